use std::sync::Arc;

use log::warn;

use crate::collection::AnalysisConfig;
use crate::emotion::{fallback::analyze_by_keywords, response::parse_classification};
use crate::error::ClassificationError;
use crate::llm::{CompletionRequest, TextModel};
use crate::models::{EmotionAnalysis, SourceRecord};
use crate::log_info;

const ENABLE_LOGS: bool = true;

const MAX_CLASSIFIED_RECORDS: usize = 20;
const CLASSIFIER_MAX_TOKENS: u32 = 1000;
const CLASSIFIER_TEMPERATURE: f32 = 0.3;

const SYSTEM_PROMPT: &str =
    "あなたは感情分析の専門家です。与えられたテキストから感情を正確に分析し、JSON形式で返してください。";

/// AI-backed emotion analysis with a deterministic keyword fallback.
///
/// One classification call per `analyze`; any failure drops straight to the
/// keyword pass over the full record set. Never returns an error.
pub struct EmotionAnalyzer {
    model: Arc<dyn TextModel>,
    model_name: String,
    config: Arc<AnalysisConfig>,
}

impl EmotionAnalyzer {
    pub fn new(model: Arc<dyn TextModel>, model_name: impl Into<String>, config: Arc<AnalysisConfig>) -> Self {
        Self {
            model,
            model_name: model_name.into(),
            config,
        }
    }

    pub async fn analyze(&self, records: &[SourceRecord]) -> EmotionAnalysis {
        if records.is_empty() {
            log_info!("No records to analyze, using neutral emotion");
            return EmotionAnalysis::neutral();
        }

        log_info!(
            "Analyzing emotions for {} records via {}",
            records.len(),
            self.model.name()
        );

        match self.classify(records).await {
            Ok(analysis) => {
                log_info!(
                    "Emotion analysis complete: {} (confidence {:.0}%)",
                    analysis.primary,
                    analysis.confidence * 100.0
                );
                analysis
            }
            Err(err) => {
                warn!("Emotion classification failed, using keyword fallback: {}", err);
                analyze_by_keywords(records, self.config.emotion_keywords())
            }
        }
    }

    async fn classify(&self, records: &[SourceRecord]) -> Result<EmotionAnalysis, ClassificationError> {
        let request = CompletionRequest {
            model: self.model_name.clone(),
            system: SYSTEM_PROMPT.to_string(),
            user: build_prompt(&render_activity(records)),
            max_tokens: CLASSIFIER_MAX_TOKENS,
            temperature: CLASSIFIER_TEMPERATURE,
        };
        let response = self.model.complete(request).await?;
        parse_classification(&response)
    }
}

/// The most important records, one `[time] origin: content` line each.
/// Works on a sorted copy; the caller's order is untouched.
pub fn render_activity(records: &[SourceRecord]) -> String {
    let mut ranked: Vec<&SourceRecord> = records.iter().collect();
    ranked.sort_by(|a, b| b.importance_or_zero().total_cmp(&a.importance_or_zero()));
    ranked
        .into_iter()
        .take(MAX_CLASSIFIED_RECORDS)
        .map(SourceRecord::render_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn build_prompt(activity: &str) -> String {
    format!(
        r#"以下の1日の活動データを分析して、感情の傾向を判断してください。

活動データ:
{activity}

以下のJSON形式で回答してください：
{{
  "primary": "主要な感情（happy, sad, surprised, angry, learning, anxious, relieved, gratefulのいずれか）",
  "secondary": "副次的な感情（オプション）",
  "confidence": 0.0から1.0の信頼度スコア,
  "timeline": [
    {{"time": "HH:00", "emotion": "感情"}}
  ]
}}

感情カテゴリの定義:
- happy: 喜び、楽しみ、ポジティブな感情
- sad: 悲しみ、辛さ、ネガティブな感情
- surprised: 驚き、予想外の出来事
- angry: 怒り、不満、イライラ
- learning: 学習、発見、成長、気づき
- anxious: 不安、心配、緊張
- relieved: 安心、ホッとした、緊張の緩和
- grateful: 感謝、ありがとう、ありがたい"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Origin;
    use chrono::{Local, TimeZone};

    #[test]
    fn render_keeps_top_twenty_by_importance() {
        let ts = Local.with_ymd_and_hms(2025, 3, 10, 9, 5, 0).unwrap();
        let records: Vec<SourceRecord> = (0..25)
            .map(|i| {
                let mut record = SourceRecord::new(Origin::Chat, ts, format!("item-{i:02}"));
                record.importance = Some(i as f64);
                record
            })
            .collect();

        let rendered = render_activity(&records);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 20);
        assert_eq!(lines[0], "[09:05:00] chat: item-24");
        assert!(!rendered.contains("item-04"));
        assert_eq!(records[0].content, "item-00");
    }

    #[test]
    fn prompt_embeds_activity_lines() {
        let prompt = build_prompt("[09:00:00] chat: おはよう");
        assert!(prompt.contains("活動データ:\n[09:00:00] chat: おはよう\n"));
        assert!(prompt.contains("\"primary\""));
    }
}
