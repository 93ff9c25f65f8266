use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;

use super::{local_at, SourceReader};
use crate::models::{Origin, RecordMetadata, SourceRecord};
use crate::settings::DiscordSourceSettings;

const AUTHOR: &str = "かんな";

/// Discord messages. No API connectivity yet; emits the day's fixed sample
/// messages.
pub struct ChatReader {
    settings: DiscordSourceSettings,
}

impl ChatReader {
    pub fn new(settings: DiscordSourceSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SourceReader for ChatReader {
    fn origin(&self) -> Origin {
        Origin::Chat
    }

    async fn read(&self, date: NaiveDate) -> Result<Vec<SourceRecord>> {
        let samples = [
            (9, "秘書さんの部屋", "今日も頑張ろう！"),
            (18, "dev-kanna-diary", "日記システムの開発、楽しかった！"),
        ];

        let mut records = Vec::with_capacity(samples.len());
        for (hour, channel, content) in samples {
            records.push(
                SourceRecord::new(Origin::Chat, local_at(date, hour, 0)?, content).with_metadata(
                    RecordMetadata::Chat {
                        channel: channel.to_string(),
                        author: AUTHOR.to_string(),
                    },
                ),
            );
        }
        records.truncate(self.settings.message_limit as usize);

        debug!("discord: {} messages for {}", records.len(), date);
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[tokio::test]
    async fn sample_messages_land_on_the_requested_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let records = ChatReader::new(DiscordSourceSettings::default()).read(date).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.timestamp.date_naive() == date));
        assert_eq!(records[0].timestamp.hour(), 9);
        assert_eq!(records[1].content, "日記システムの開発、楽しかった！");
    }
}
