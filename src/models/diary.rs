//! Diary entry data model.
//!
//! An entry is what the generator produces and the writer persists. Only the
//! narrative `content` survives a round trip through the file store.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::EmotionAnalysis;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub title: String,
    pub time: Option<String>,
    pub completed: bool,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Learning {
    pub content: String,
    pub importance: f64,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EntryMetadata {
    pub generated_at: DateTime<Local>,
    pub source_count: usize,
    pub model: String,
    pub is_birthday: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiaryEntry {
    pub date: NaiveDate,
    pub kind: EntryKind,
    pub title: String,
    pub mood: String,
    pub activities: Vec<Activity>,
    pub learnings: Vec<Learning>,
    /// `None` for entries loaded back from disk.
    pub emotions: Option<EmotionAnalysis>,
    pub content: String,
    pub metadata: Option<EntryMetadata>,
}

impl DiaryEntry {
    /// Entry rebuilt from a stored file: narrative only, no analysis attached.
    pub fn from_stored(date: NaiveDate, kind: EntryKind, title: String, content: String) -> Self {
        Self {
            date,
            kind,
            title,
            mood: "😐".to_string(),
            activities: Vec::new(),
            learnings: Vec::new(),
            emotions: None,
            content,
            metadata: None,
        }
    }
}
