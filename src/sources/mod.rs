//! Activity source readers.
//!
//! One reader per enabled origin. Readers are thin: they turn whatever the
//! backend returns for a day into [`SourceRecord`]s and leave scoring to the
//! collection pipeline.

mod calendar;
mod chat;
mod notes;
mod vcs;

pub use calendar::CalendarReader;
pub use chat::ChatReader;
pub use notes::NotesReader;
pub use vcs::VcsReader;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate};

use crate::models::{Origin, SourceRecord};
use crate::settings::SourcesSettings;

#[async_trait]
pub trait SourceReader: Send + Sync {
    fn origin(&self) -> Origin;

    /// Records for one local calendar day.
    async fn read(&self, date: NaiveDate) -> Result<Vec<SourceRecord>>;
}

/// Readers for every enabled source, in origin order.
pub fn build_readers(settings: &SourcesSettings) -> Vec<Arc<dyn SourceReader>> {
    let mut readers: Vec<Arc<dyn SourceReader>> = Vec::new();
    if settings.discord.enabled {
        readers.push(Arc::new(ChatReader::new(settings.discord.clone())));
    }
    if settings.github.enabled {
        readers.push(Arc::new(VcsReader::new(settings.github.clone())));
    }
    if settings.calendar.enabled {
        readers.push(Arc::new(CalendarReader::new(settings.calendar.clone())));
    }
    if settings.obsidian.enabled {
        readers.push(Arc::new(NotesReader::new(settings.obsidian.clone())));
    }
    readers
}

/// Local timestamp for a wall-clock time on `date`.
pub(crate) fn local_at(date: NaiveDate, hour: u32, minute: u32) -> Result<DateTime<Local>> {
    date.and_hms_opt(hour, minute, 0)
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
        .ok_or_else(|| anyhow!("{date} {hour:02}:{minute:02} does not exist in the local timezone"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_enabled_sources_get_readers() {
        let mut settings = SourcesSettings::default();
        assert!(build_readers(&settings).is_empty());

        settings.github.enabled = true;
        settings.obsidian.enabled = true;
        let origins: Vec<Origin> = build_readers(&settings).iter().map(|r| r.origin()).collect();
        assert_eq!(origins, vec![Origin::Vcs, Origin::Notes]);
    }
}
