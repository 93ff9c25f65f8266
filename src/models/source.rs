//! Source record data model.
//!
//! A `SourceRecord` is one normalized activity item handed to the pipeline by a
//! source reader. Everything except `importance` is fixed once the reader has
//! produced it; the importance scorer is the only writer of that field.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// External system a record came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Chat,
    Vcs,
    Calendar,
    Notes,
}

impl Origin {
    pub const ALL: [Origin; 4] = [Origin::Chat, Origin::Vcs, Origin::Calendar, Origin::Notes];

    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Chat => "chat",
            Origin::Vcs => "vcs",
            Origin::Calendar => "calendar",
            Origin::Notes => "notes",
        }
    }

    /// Name of the `sources.*` settings block this origin is read from.
    pub fn source_name(&self) -> &'static str {
        match self {
            Origin::Chat => "discord",
            Origin::Vcs => "github",
            Origin::Calendar => "calendar",
            Origin::Notes => "obsidian",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VcsItemKind {
    Issue,
    Commit,
    PullRequest,
}

/// Typed per-origin metadata. Each variant carries the keys its origin defines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RecordMetadata {
    #[serde(rename_all = "camelCase")]
    Chat {
        channel: String,
        author: String,
    },
    #[serde(rename_all = "camelCase")]
    Vcs {
        repo: String,
        number: Option<String>,
        kind: VcsItemKind,
    },
    #[serde(rename_all = "camelCase")]
    Calendar {
        calendar_id: String,
        location: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Notes {
        note_path: String,
    },
    #[default]
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    pub origin: Origin,
    pub timestamp: DateTime<Local>,
    pub content: String,
    #[serde(default)]
    pub metadata: RecordMetadata,
    pub importance: Option<f64>,
}

impl SourceRecord {
    pub fn new(origin: Origin, timestamp: DateTime<Local>, content: impl Into<String>) -> Self {
        Self {
            origin,
            timestamp,
            content: content.into(),
            metadata: RecordMetadata::Empty,
            importance: None,
        }
    }

    pub fn with_metadata(mut self, metadata: RecordMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Importance with unscored records treated as zero.
    pub fn importance_or_zero(&self) -> f64 {
        self.importance.unwrap_or(0.0)
    }

    /// First `n` characters of the content (character-based, never splits a code point).
    pub fn content_prefix(&self, n: usize) -> String {
        self.content.chars().take(n).collect()
    }

    /// `HH:MM:SS` in local time, used when rendering records for prompts.
    pub fn clock_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    /// `[HH:MM:SS] origin: content`
    pub fn render_line(&self) -> String {
        format!("[{}] {}: {}", self.clock_time(), self.origin, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn metadata_fields_serialize_camel_case() {
        let ts = Local.with_ymd_and_hms(2025, 3, 10, 15, 0, 0).unwrap();
        let record = SourceRecord::new(Origin::Calendar, ts, "定例").with_metadata(RecordMetadata::Calendar {
            calendar_id: "primary".into(),
            location: None,
        });
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value["metadata"],
            json!({ "type": "calendar", "calendarId": "primary", "location": null })
        );

        let notes = serde_json::to_value(RecordMetadata::Notes {
            note_path: "daily/2025-03-10.md".into(),
        })
        .unwrap();
        assert_eq!(notes, json!({ "type": "notes", "notePath": "daily/2025-03-10.md" }));
    }

    #[test]
    fn vcs_metadata_carries_its_item_kind() {
        let vcs = RecordMetadata::Vcs {
            repo: "owner/repo".into(),
            number: Some("30".into()),
            kind: VcsItemKind::PullRequest,
        };
        let value = serde_json::to_value(&vcs).unwrap();
        assert_eq!(value["type"], "vcs");
        assert_eq!(value["kind"], "pull_request");
        let back: RecordMetadata = serde_json::from_value(value).unwrap();
        assert_eq!(back, vcs);
    }
}
