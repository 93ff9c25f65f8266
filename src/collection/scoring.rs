use chrono::{DateTime, Local};

use crate::collection::config::KeywordTable;
use crate::models::SourceRecord;

const MAX_IMPORTANCE: f64 = 100.0;
const LENGTH_WEIGHT: f64 = 20.0;
const LENGTH_SATURATION_CHARS: f64 = 100.0;
const POINTS_PER_KEYWORD: f64 = 10.0;

/// Importance of one record and the factors it was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportanceScore {
    pub total: f64,
    pub length: f64,
    pub keywords: f64,
    pub recency: f64,
}

/// Compute importance as clamp(length + keywords + recency, 0, 100).
pub fn compute_importance(
    record: &SourceRecord,
    keywords: &KeywordTable,
    now: DateTime<Local>,
) -> ImportanceScore {
    let length = score_length(&record.content);
    let keyword_score = score_keywords(&record.content, keywords);
    let recency = score_recency(record.timestamp, now);

    ImportanceScore {
        total: (length + keyword_score + recency).clamp(0.0, MAX_IMPORTANCE),
        length,
        keywords: keyword_score,
        recency,
    }
}

/// Score every record and store the total in its `importance` field.
pub fn score_records(records: &mut [SourceRecord], keywords: &KeywordTable, now: DateTime<Local>) {
    for record in records.iter_mut() {
        let score = compute_importance(record, keywords, now);
        record.importance = Some(score.total);
    }
}

/// Linear in character count, saturating at 100 characters: 0..=20.
fn score_length(content: &str) -> f64 {
    let chars = content.chars().count() as f64;
    (chars / LENGTH_SATURATION_CHARS).min(1.0) * LENGTH_WEIGHT
}

/// 10 points for every configured keyword found in the content.
fn score_keywords(content: &str, keywords: &KeywordTable) -> f64 {
    keywords.total_hits(content) as f64 * POINTS_PER_KEYWORD
}

/// Step function on age: <6h=30, <12h=20, <24h=10, otherwise 0.
/// Records stamped in the future count as fresh.
fn score_recency(timestamp: DateTime<Local>, now: DateTime<Local>) -> f64 {
    let age_hours = (now - timestamp).num_milliseconds() as f64 / 3_600_000.0;
    if age_hours < 6.0 {
        30.0
    } else if age_hours < 12.0 {
        20.0
    } else if age_hours < 24.0 {
        10.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Origin;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 23, 0, 0).unwrap()
    }

    fn table() -> KeywordTable {
        KeywordTable::from_pairs([
            ("happy", vec!["楽しい", "嬉しい"]),
            ("sad", vec!["辛い"]),
        ])
    }

    #[test]
    fn length_saturates_at_one_hundred_chars() {
        assert_eq!(score_length(""), 0.0);
        assert!((score_length(&"a".repeat(50)) - 10.0).abs() < 1e-9);
        assert_eq!(score_length(&"あ".repeat(100)), 20.0);
        assert_eq!(score_length(&"あ".repeat(500)), 20.0);
    }

    #[test]
    fn recency_steps() {
        let n = now();
        assert_eq!(score_recency(n - Duration::hours(1), n), 30.0);
        assert_eq!(score_recency(n - Duration::hours(6), n), 20.0);
        assert_eq!(score_recency(n - Duration::hours(11), n), 20.0);
        assert_eq!(score_recency(n - Duration::hours(12), n), 10.0);
        assert_eq!(score_recency(n - Duration::hours(23), n), 10.0);
        assert_eq!(score_recency(n - Duration::hours(24), n), 0.0);
        assert_eq!(score_recency(n + Duration::hours(2), n), 30.0);
    }

    #[test]
    fn breakdown_adds_up() {
        let record = SourceRecord::new(Origin::Chat, now() - Duration::hours(8), "楽しい一日、辛いこともあった");
        let score = compute_importance(&record, &table(), now());
        assert_eq!(score.keywords, 20.0);
        assert_eq!(score.recency, 20.0);
        assert!((score.total - (score.length + 40.0)).abs() < 1e-9);
    }

    #[test]
    fn scores_stay_within_bounds() {
        let many = KeywordTable::from_pairs([(
            "happy",
            (0..20).map(|i| format!("k{i}")).collect::<Vec<_>>(),
        )]);
        let content: String = (0..20).map(|i| format!("k{i} ")).collect();
        let mut records = vec![
            SourceRecord::new(Origin::Chat, now(), content),
            SourceRecord::new(Origin::Vcs, now() - Duration::days(3), "x"),
        ];
        score_records(&mut records, &many, now());
        assert_eq!(records[0].importance, Some(100.0));
        for record in &records {
            let importance = record.importance.unwrap();
            assert!((0.0..=100.0).contains(&importance));
        }
    }
}
