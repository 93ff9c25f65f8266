use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;

use super::SourceReader;
use crate::models::{Origin, SourceRecord};
use crate::settings::CalendarSourceSettings;

pub struct CalendarReader {
    settings: CalendarSourceSettings,
}

impl CalendarReader {
    pub fn new(settings: CalendarSourceSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SourceReader for CalendarReader {
    fn origin(&self) -> Origin {
        Origin::Calendar
    }

    async fn read(&self, date: NaiveDate) -> Result<Vec<SourceRecord>> {
        // TODO: fetch events from the Google Calendar API
        debug!("calendar '{}': 0 events for {}", self.settings.calendar_id, date);
        Ok(Vec::new())
    }
}
