use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;

use super::SourceReader;
use crate::models::{Origin, SourceRecord};
use crate::settings::ObsidianSourceSettings;

pub struct NotesReader {
    settings: ObsidianSourceSettings,
}

impl NotesReader {
    pub fn new(settings: ObsidianSourceSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SourceReader for NotesReader {
    fn origin(&self) -> Origin {
        Origin::Notes
    }

    async fn read(&self, date: NaiveDate) -> Result<Vec<SourceRecord>> {
        debug!(
            "obsidian vault {}: 0 notes for {}",
            self.settings.vault_path.display(),
            date
        );
        Ok(Vec::new())
    }
}
