//! Narrative generation: collected data in, [`DiaryEntry`] out.
//!
//! Daily, weekly and monthly entries share one generator. They differ only in
//! prompts, token budget and title; activities, learnings and mood are derived
//! from the collected data the same way for all three.

mod prompts;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use log::info;

use crate::collection::{AnalysisConfig, KeywordTable};
use crate::error::ConfigError;
use crate::llm::{CompletionRequest, TextModel};
use crate::models::{
    Activity, CollectedData, DiaryEntry, Emotion, EntryKind, EntryMetadata, Learning,
};
use crate::settings::{GenerationSettings, PersonaSettings, Settings};

const WEEKLY_MAX_TOKENS: u32 = 3000;
const MONTHLY_MAX_TOKENS: u32 = 4000;
const REFLECTION_TEMPERATURE: f32 = 0.9;

const MAX_LEARNINGS: usize = 5;
const DEFAULT_LEARNING_IMPORTANCE: f64 = 50.0;
const DEFAULT_SCORE_WEIGHT: f64 = 10.0;
const ACTIVITY_TITLE_CHARS: usize = 50;
const LEARNING_CATEGORY: &str = "learning";
const BIRTHDAY_MOOD: &str = "🎂";

/// Keyword-weighted emotion mix for the prompt, each 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmotionScores {
    pub happy: u32,
    pub surprised: u32,
    pub angry: u32,
    pub sad: u32,
    pub anxious: u32,
    pub learned: u32,
}

pub struct DiaryGenerator {
    model: Arc<dyn TextModel>,
    generation: GenerationSettings,
    persona: PersonaSettings,
    birthday: (u32, u32),
    config: Arc<AnalysisConfig>,
}

impl DiaryGenerator {
    /// Fails on a malformed persona birthday.
    pub fn new(
        settings: &Settings,
        config: Arc<AnalysisConfig>,
        model: Arc<dyn TextModel>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            model,
            generation: settings.generation.clone(),
            persona: settings.persona.clone(),
            birthday: settings.persona.birthday_month_day()?,
            config,
        })
    }

    pub fn config(&self) -> &Arc<AnalysisConfig> {
        &self.config
    }

    pub fn is_birthday(&self, date: NaiveDate) -> bool {
        (date.month(), date.day()) == self.birthday
    }

    pub async fn generate(&self, data: &CollectedData) -> Result<DiaryEntry> {
        let is_birthday = self.is_birthday(data.date);
        if is_birthday {
            info!("{} is {}'s birthday, generating the birthday edition", data.date, self.persona.name);
        }

        let scores = emotion_scores(data, self.config.emotion_keywords());
        let content = self
            .complete(
                prompts::daily_system(&self.persona, &self.generation.personality, is_birthday),
                prompts::daily_user(data, &format_date_ja(data.date), &scores, is_birthday),
                self.generation.max_tokens,
                self.generation.temperature,
            )
            .await
            .context("Failed to generate daily entry")?;

        let date_label = format_date_ja(data.date);
        let (title, mood) = if is_birthday {
            (
                format!("🎂 {}の誕生日 - {}", self.persona.name, date_label),
                BIRTHDAY_MOOD.to_string(),
            )
        } else {
            (
                format!("{}の日記 - {}", self.persona.name, date_label),
                data.emotions.primary.mood_emoji().to_string(),
            )
        };

        Ok(self.assemble(data, EntryKind::Daily, title, mood, content, is_birthday))
    }

    pub async fn generate_weekly(
        &self,
        data: &CollectedData,
        week_start: NaiveDate,
        week_end: NaiveDate,
    ) -> Result<DiaryEntry> {
        let range_label = format!("{}〜{}", format_date_ja(week_start), format_date_ja(week_end));
        let content = self
            .complete(
                prompts::weekly_system(&self.persona, &self.generation.personality),
                prompts::weekly_user(data, &range_label),
                WEEKLY_MAX_TOKENS,
                REFLECTION_TEMPERATURE,
            )
            .await
            .context("Failed to generate weekly reflection")?;

        let title = format!("📅 週次振り返り - {range_label}");
        let mood = data.emotions.primary.mood_emoji().to_string();
        Ok(self.assemble(data, EntryKind::Weekly, title, mood, content, false))
    }

    pub async fn generate_monthly(
        &self,
        data: &CollectedData,
        month_start: NaiveDate,
        month_end: NaiveDate,
    ) -> Result<DiaryEntry> {
        let month_label = format!("{}年{}月", month_start.year(), month_start.month());
        info!("Generating monthly reflection for {}..={}", month_start, month_end);
        let content = self
            .complete(
                prompts::monthly_system(&self.persona, &self.generation.personality),
                prompts::monthly_user(data, &month_label),
                MONTHLY_MAX_TOKENS,
                REFLECTION_TEMPERATURE,
            )
            .await
            .context("Failed to generate monthly reflection")?;

        let title = format!("📆 月次振り返り - {month_label}");
        let mood = data.emotions.primary.mood_emoji().to_string();
        Ok(self.assemble(data, EntryKind::Monthly, title, mood, content, false))
    }

    async fn complete(&self, system: String, user: String, max_tokens: u32, temperature: f32) -> Result<String> {
        let request = CompletionRequest {
            model: self.generation.ai_model.clone(),
            system,
            user,
            max_tokens,
            temperature,
        };
        let content = self.model.complete(request).await?;
        info!("Generated {} chars with {}", content.chars().count(), self.model.name());
        Ok(content)
    }

    fn assemble(
        &self,
        data: &CollectedData,
        kind: EntryKind,
        title: String,
        mood: String,
        content: String,
        is_birthday: bool,
    ) -> DiaryEntry {
        DiaryEntry {
            date: data.date,
            kind,
            title,
            mood,
            activities: activities_from(data),
            learnings: extract_learnings(data, self.config.emotion_keywords()),
            emotions: Some(data.emotions.clone()),
            content,
            metadata: Some(EntryMetadata {
                generated_at: Local::now(),
                source_count: data.sources.len(),
                model: self.generation.ai_model.clone(),
                is_birthday,
            }),
        }
    }
}

/// `2025年03月10日（月）`
pub fn format_date_ja(date: NaiveDate) -> String {
    const WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];
    let weekday = WEEKDAYS[date.weekday().num_days_from_sunday() as usize];
    format!("{}（{}）", date.format("%Y年%m月%d日"), weekday)
}

/// One completed activity per important event.
pub fn activities_from(data: &CollectedData) -> Vec<Activity> {
    data.important_events
        .iter()
        .map(|event| Activity {
            title: event.content_prefix(ACTIVITY_TITLE_CHARS),
            time: Some(event.clock_time()),
            completed: true,
            category: event.origin.as_str().to_string(),
        })
        .collect()
}

/// Lines mentioning a `learning` keyword, unique by text, most important first.
pub fn extract_learnings(data: &CollectedData, keywords: &KeywordTable) -> Vec<Learning> {
    let Some(category) = keywords.category(LEARNING_CATEGORY) else {
        return Vec::new();
    };

    let mut learnings: Vec<Learning> = Vec::new();
    for record in &data.sources {
        for keyword in &category.keywords {
            let Some(line) = record.content.lines().find(|line| line.contains(keyword.as_str())) else {
                continue;
            };
            if learnings.iter().any(|learning| learning.content == line) {
                continue;
            }
            learnings.push(Learning {
                content: line.to_string(),
                importance: record
                    .importance
                    .filter(|importance| *importance > 0.0)
                    .unwrap_or(DEFAULT_LEARNING_IMPORTANCE),
                category: record.origin.as_str().to_string(),
            });
        }
    }

    learnings.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    learnings.truncate(MAX_LEARNINGS);
    learnings
}

/// Keyword hits per emotion weighted by record importance, scaled so the
/// strongest emotion is 100.
pub fn emotion_scores(data: &CollectedData, keywords: &KeywordTable) -> EmotionScores {
    // happy, surprised, angry, sad, anxious, learned
    let mut raw = [0.0f64; 6];

    for record in &data.sources {
        let weight = record
            .importance
            .filter(|importance| *importance > 0.0)
            .unwrap_or(DEFAULT_SCORE_WEIGHT);
        for (category, hits) in keywords.hits_by_category(&record.content) {
            let slot = match Emotion::coerce(&category.name) {
                Emotion::Happy | Emotion::Relieved | Emotion::Grateful => 0,
                Emotion::Surprised => 1,
                Emotion::Angry => 2,
                Emotion::Sad => 3,
                Emotion::Anxious => 4,
                Emotion::Learning => 5,
            };
            raw[slot] += weight * hits as f64;
        }
    }

    let max = raw.iter().copied().fold(1.0f64, f64::max);
    let scaled = |value: f64| (value / max * 100.0).round() as u32;

    EmotionScores {
        happy: scaled(raw[0]),
        surprised: scaled(raw[1]),
        angry: scaled(raw[2]),
        sad: scaled(raw[3]),
        anxious: scaled(raw[4]),
        learned: scaled(raw[5]),
    }
}
