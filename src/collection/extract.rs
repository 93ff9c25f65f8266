use crate::models::SourceRecord;

/// Records at or above `cutoff` (0..100 scale), most important first.
/// Equal scores keep their input order.
pub fn important_events(records: &[SourceRecord], cutoff: f64) -> Vec<SourceRecord> {
    let mut events: Vec<SourceRecord> = records
        .iter()
        .filter(|record| record.importance_or_zero() >= cutoff)
        .cloned()
        .collect();
    // sort_by is stable
    events.sort_by(|a, b| b.importance_or_zero().total_cmp(&a.importance_or_zero()));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Origin;
    use chrono::{Local, TimeZone};

    fn scored(content: &str, importance: f64) -> SourceRecord {
        let ts = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let mut record = SourceRecord::new(Origin::Chat, ts, content);
        record.importance = Some(importance);
        record
    }

    #[test]
    fn keeps_only_records_over_threshold() {
        let records = vec![scored("low", 10.0), scored("high", 90.0), scored("mid", 50.0)];
        let events = important_events(&records, 0.6 * 100.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].content, "high");
    }

    #[test]
    fn threshold_is_inclusive_and_ties_are_stable() {
        let records = vec![
            scored("a", 60.0),
            scored("b", 80.0),
            scored("c", 60.0),
            scored("d", 80.0),
        ];
        let events = important_events(&records, 60.0);
        let order: Vec<&str> = events.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn unscored_records_count_as_zero() {
        let ts = Local.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let unscored = SourceRecord::new(Origin::Notes, ts, "n");
        assert!(important_events(&[unscored.clone()], 1.0).is_empty());
        assert_eq!(important_events(&[unscored], 0.0).len(), 1);
    }
}
