use std::collections::HashSet;

use crate::models::{Origin, SourceRecord};

/// Characters of content that take part in the duplicate key.
const CONTENT_KEY_CHARS: usize = 50;

/// Identity of a record for deduplication: origin, timestamp to the second,
/// and the first 50 characters of content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DuplicateKey {
    origin: Origin,
    epoch_secs: i64,
    content_prefix: String,
}

impl DuplicateKey {
    fn of(record: &SourceRecord) -> Self {
        Self {
            origin: record.origin,
            epoch_secs: record.timestamp.timestamp(),
            content_prefix: record.content_prefix(CONTENT_KEY_CHARS),
        }
    }
}

/// Drop records whose key was already seen, keeping the first occurrence.
pub fn dedupe(records: Vec<SourceRecord>) -> Vec<SourceRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(DuplicateKey::of(record)))
        .collect()
}
