//! Secretary-role classification.
//!
//! A record is role activity when its lower-cased content contains any of the
//! coordination keywords below. Matching records are then bucketed into exactly
//! one [`RoleCategory`] by the first category whose terms appear.

use std::collections::BTreeMap;

use crate::models::{RoleActivity, RoleCategory, SourceRecord};

const ROLE_KEYWORDS: &[&str] = &[
    "管理",
    "調整",
    "スケジュール",
    "連絡",
    "進捗管理",
    "会議",
    "報告",
    "資料作成",
    "タスク",
    "プロジェクト",
    "リマインド",
    "予定",
    "予定調整",
    "会議の準備",
    "議事録",
    "まとめ",
    "整理",
    "対応",
    "確認",
    "コーディネート",
    "調整業務",
    "アポイント",
    "日程",
];

const MEETING_TERMS: &[&str] = &["会議", "調整", "コーディネート"];
const PROGRESS_TERMS: &[&str] = &["進捗", "タスク", "プロジェクト"];
const DOCUMENT_TERMS: &[&str] = &["資料", "報告", "議事録", "まとめ"];
const CONTACT_TERMS: &[&str] = &["連絡", "確認", "対応"];

fn contains_any(content: &str, terms: &[&str]) -> bool {
    terms
        .iter()
        .any(|term| content.contains(term.to_lowercase().as_str()))
}

pub fn is_role_activity(record: &SourceRecord) -> bool {
    contains_any(&record.content.to_lowercase(), ROLE_KEYWORDS)
}

/// First matching category in priority order; `Other` when none match.
pub fn categorize(record: &SourceRecord) -> RoleCategory {
    let content = record.content.to_lowercase();
    if contains_any(&content, MEETING_TERMS) {
        RoleCategory::MeetingCoordination
    } else if contains_any(&content, PROGRESS_TERMS) {
        RoleCategory::ProgressTracking
    } else if contains_any(&content, DOCUMENT_TERMS) {
        RoleCategory::DocumentsReports
    } else if contains_any(&content, CONTACT_TERMS) {
        RoleCategory::ContactFollowUp
    } else {
        RoleCategory::Other
    }
}

pub fn classify_role(records: &[SourceRecord]) -> RoleActivity {
    let activities: Vec<SourceRecord> = records
        .iter()
        .filter(|record| is_role_activity(record))
        .cloned()
        .collect();

    let mut categories: BTreeMap<RoleCategory, Vec<SourceRecord>> = RoleCategory::ALL
        .iter()
        .map(|category| (*category, Vec::new()))
        .collect();
    for record in &activities {
        categories
            .entry(categorize(record))
            .or_default()
            .push(record.clone());
    }

    let summary = summarize(activities.len(), &categories);

    RoleActivity {
        activities,
        categories,
        summary,
    }
}

/// `秘書としての活動: N件 (会議・調整: 2件, 進捗管理: 1件)`
fn summarize(total: usize, categories: &BTreeMap<RoleCategory, Vec<SourceRecord>>) -> String {
    let breakdown: Vec<String> = categories
        .iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(category, items)| format!("{}: {}件", category.label(), items.len()))
        .collect();

    if breakdown.is_empty() {
        format!("秘書としての活動: {total}件")
    } else {
        format!("秘書としての活動: {total}件 ({})", breakdown.join(", "))
    }
}
