use chrono::{DateTime, Local};
use serde_json::json;

use crate::collection::{config::AnalysisConfig, dedupe::dedupe, scoring::score_records};
use crate::models::{EmotionAnalysis, SourceRecord};

const CONTEXT_MAX_ACTIVITIES: usize = 20;
const CONTEXT_CONTENT_CHARS: usize = 100;

/// Drop records whose content is blank after trimming.
pub fn drop_blank(records: Vec<SourceRecord>) -> Vec<SourceRecord> {
    records
        .into_iter()
        .filter(|record| !record.content.trim().is_empty())
        .collect()
}

/// Synchronous part of a collection run: raw reader output in, scored
/// working set out. Collection order is preserved.
pub fn prepare_records(
    raw: Vec<SourceRecord>,
    config: &AnalysisConfig,
    now: DateTime<Local>,
) -> Vec<SourceRecord> {
    // Edge case: nothing collected
    if raw.is_empty() {
        return Vec::new();
    }

    // Step 1: Remove structural duplicates
    let unique = dedupe(raw);

    // Step 2: Remove blank records
    let mut records = drop_blank(unique);

    // Step 3: Score importance in place
    score_records(&mut records, config.emotion_keywords(), now);

    records
}

/// Compact JSON summary of the day handed to the narrative generator.
pub fn build_context(records: &[SourceRecord], emotions: &EmotionAnalysis) -> String {
    let activities: Vec<_> = records
        .iter()
        .take(CONTEXT_MAX_ACTIVITIES)
        .map(|record| {
            json!({
                "origin": record.origin,
                "time": record.clock_time(),
                "content": record.content_prefix(CONTEXT_CONTENT_CHARS),
            })
        })
        .collect();

    json!({
        "activities": activities,
        "emotions": emotions.primary,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Origin;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 23, 0, 0).unwrap()
    }

    #[test]
    fn blank_records_are_dropped() {
        let ts = now();
        let records = vec![
            SourceRecord::new(Origin::Chat, ts, "  \n\t"),
            SourceRecord::new(Origin::Chat, ts, ""),
            SourceRecord::new(Origin::Chat, ts, " 中身 "),
        ];
        let kept = drop_blank(records);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].content, " 中身 ");
    }

    #[test]
    fn prepare_dedupes_filters_and_scores() {
        let ts = now() - Duration::hours(2);
        let raw = vec![
            SourceRecord::new(Origin::Chat, ts, "楽しい"),
            SourceRecord::new(Origin::Chat, ts, "楽しい"),
            SourceRecord::new(Origin::Vcs, ts, "   "),
            SourceRecord::new(Origin::Notes, ts, "メモ"),
        ];
        let prepared = prepare_records(raw, &AnalysisConfig::default(), now());
        let contents: Vec<&str> = prepared.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["楽しい", "メモ"]);
        assert!(prepared.iter().all(|r| r.importance.is_some()));
        assert!(prepared[0].importance > prepared[1].importance);
    }

    #[test]
    fn context_is_capped_and_truncated() {
        let ts = now();
        let records: Vec<_> = (0..25)
            .map(|i| SourceRecord::new(Origin::Chat, ts, format!("{i}{}", "x".repeat(150))))
            .collect();
        let context = build_context(&records, &EmotionAnalysis::neutral());
        let value: serde_json::Value = serde_json::from_str(&context).unwrap();
        let activities = value["activities"].as_array().unwrap();
        assert_eq!(activities.len(), 20);
        assert_eq!(activities[0]["content"].as_str().unwrap().chars().count(), 100);
        assert_eq!(activities[0]["origin"], "chat");
        assert_eq!(value["emotions"], "learning");
    }
}
