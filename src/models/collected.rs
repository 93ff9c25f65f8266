use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EmotionAnalysis, SourceRecord};

/// Role-activity buckets, declared in classification priority order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    MeetingCoordination,
    ProgressTracking,
    DocumentsReports,
    ContactFollowUp,
    Other,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 5] = [
        RoleCategory::MeetingCoordination,
        RoleCategory::ProgressTracking,
        RoleCategory::DocumentsReports,
        RoleCategory::ContactFollowUp,
        RoleCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoleCategory::MeetingCoordination => "会議・調整",
            RoleCategory::ProgressTracking => "進捗管理",
            RoleCategory::DocumentsReports => "資料作成・報告",
            RoleCategory::ContactFollowUp => "連絡・対応",
            RoleCategory::Other => "その他",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleActivity {
    pub activities: Vec<SourceRecord>,
    /// Always holds all five categories, possibly empty.
    pub categories: BTreeMap<RoleCategory, Vec<SourceRecord>>,
    pub summary: String,
}

impl RoleActivity {
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn category(&self, category: RoleCategory) -> &[SourceRecord] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Everything one collection run produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CollectedData {
    pub date: NaiveDate,
    /// Collection order.
    pub sources: Vec<SourceRecord>,
    /// Importance-descending.
    pub important_events: Vec<SourceRecord>,
    pub emotions: EmotionAnalysis,
    pub context: String,
    pub secretary_role: RoleActivity,
}
