use chrono::Timelike;

use crate::collection::KeywordTable;
use crate::models::{Emotion, EmotionAnalysis, SourceRecord, TimelineEntry};

/// Hour bucket of a record, `HH:00`.
pub fn hour_bucket(record: &SourceRecord) -> String {
    format!("{:02}:00", record.timestamp.hour())
}

/// Deterministic keyword-count emotion analysis.
///
/// Every record contributes, for each category, the number of that category's
/// keywords found in its content. Categories are ranked by accumulated count;
/// ties go to the category configured first. Each matching (record, category)
/// pair adds one timeline entry at the record's hour.
pub fn analyze_by_keywords(records: &[SourceRecord], keywords: &KeywordTable) -> EmotionAnalysis {
    if records.is_empty() {
        return EmotionAnalysis::neutral();
    }

    // Categories whose names coerce to the same emotion share one tally,
    // placed where that emotion is first configured.
    let mut counts: Vec<(Emotion, usize)> = Vec::new();
    let slots: Vec<usize> = keywords
        .categories()
        .iter()
        .map(|category| {
            let emotion = Emotion::coerce(&category.name);
            match counts.iter().position(|(existing, _)| *existing == emotion) {
                Some(slot) => slot,
                None => {
                    counts.push((emotion, 0));
                    counts.len() - 1
                }
            }
        })
        .collect();
    let mut timeline = Vec::new();

    for record in records {
        let time = hour_bucket(record);
        for (index, (_, hits)) in keywords.hits_by_category(&record.content).enumerate() {
            if hits == 0 {
                continue;
            }
            let slot = &mut counts[slots[index]];
            slot.1 += hits;
            timeline.push(TimelineEntry::new(time.clone(), slot.0));
        }
    }

    // Stable: equal counts keep configured order
    let mut ranked: Vec<(Emotion, usize)> = counts.into_iter().filter(|(_, count)| *count > 0).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let Some(&(primary, primary_count)) = ranked.first() else {
        return EmotionAnalysis {
            primary: Emotion::Learning,
            secondary: None,
            confidence: 0.0,
            timeline,
        };
    };

    EmotionAnalysis {
        primary,
        secondary: ranked.get(1).map(|(emotion, _)| *emotion),
        confidence: (primary_count as f64 / records.len() as f64).min(1.0),
        timeline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Origin;
    use chrono::{Local, TimeZone};

    fn at(hour: u32, content: &str) -> SourceRecord {
        let ts = Local.with_ymd_and_hms(2025, 3, 10, hour, 15, 0).unwrap();
        SourceRecord::new(Origin::Chat, ts, content)
    }

    #[test]
    fn sad_only_content_scores_negative() {
        let records = vec![at(9, "悲しい一日"), at(13, "辛い"), at(20, "寂しいし残念")];
        let analysis = analyze_by_keywords(&records, &KeywordTable::default());
        assert_eq!(analysis.primary, Emotion::Sad);
        assert_eq!(analysis.secondary, None);
        assert!(analysis.weighted_score() < 0.0);
        assert_eq!(analysis.timeline.len(), 3);
        assert_eq!(analysis.timeline[0], TimelineEntry::new("09:00", Emotion::Sad));
    }

    #[test]
    fn happy_only_content_scores_positive_and_bounded() {
        let records = vec![at(10, "楽しい！嬉しい！面白い！"), at(11, "素晴らしい")];
        let analysis = analyze_by_keywords(&records, &KeywordTable::default());
        assert_eq!(analysis.primary, Emotion::Happy);
        assert_eq!(analysis.confidence, 1.0);
        let score = analysis.weighted_score();
        assert!(score > 0.0 && score <= 1.0);
    }

    #[test]
    fn confidence_is_primary_count_over_record_count() {
        let records = vec![at(9, "不安"), at(10, "ご飯"), at(11, "散歩"), at(12, "昼寝")];
        let analysis = analyze_by_keywords(&records, &KeywordTable::default());
        assert_eq!(analysis.primary, Emotion::Anxious);
        assert!((analysis.confidence - 0.25).abs() < 1e-9);
    }

    #[test]
    fn ties_go_to_the_first_configured_category() {
        let records = vec![at(9, "感謝している"), at(10, "安心した")];
        let analysis = analyze_by_keywords(&records, &KeywordTable::default());
        // relieved is configured before grateful
        assert_eq!(analysis.primary, Emotion::Relieved);
        assert_eq!(analysis.secondary, Some(Emotion::Grateful));
    }

    #[test]
    fn no_match_yields_learning_with_zero_confidence() {
        let analysis = analyze_by_keywords(&[at(9, "ラーメン")], &KeywordTable::default());
        assert_eq!(analysis.primary, Emotion::Learning);
        assert_eq!(analysis.confidence, 0.0);
        assert!(analysis.timeline.is_empty());
    }

    #[test]
    fn custom_category_names_are_coerced() {
        let table = KeywordTable::from_pairs([("joy", vec!["yay"]), ("mystery", vec!["hmm"])]);
        let analysis = analyze_by_keywords(&[at(8, "yay yay hmm")], &table);
        assert_eq!(analysis.primary, Emotion::Happy);
        assert_eq!(analysis.secondary, Some(Emotion::Learning));
    }

    #[test]
    fn aliased_categories_share_one_tally() {
        let table = KeywordTable::from_pairs([
            ("sad", vec!["辛い"]),
            ("joy", vec!["yay"]),
            ("happy", vec!["楽しい"]),
        ]);
        let records = vec![at(8, "辛い"), at(9, "yay"), at(10, "楽しい")];
        let analysis = analyze_by_keywords(&records, &table);
        assert_eq!(analysis.primary, Emotion::Happy);
        assert_eq!(analysis.secondary, Some(Emotion::Sad));
        assert!((analysis.confidence - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(analysis.timeline.len(), 3);
    }
}
