use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde_json::json;

use crate::models::DiaryEntry;

const API_BASE: &str = "https://discord.com/api/v10";
const MESSAGE_LIMIT_CHARS: usize = 2000;
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Posts entries to a channel through the Discord bot API.
pub struct DiscordPoster {
    client: Client,
    token: Option<String>,
    channel_id: String,
}

impl DiscordPoster {
    /// Token from `DISCORD_BOT_TOKEN`.
    pub fn from_env(channel_id: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build Discord HTTP client")?;
        Ok(Self {
            client,
            token: std::env::var("DISCORD_BOT_TOKEN").ok().filter(|t| !t.is_empty()),
            channel_id: channel_id.into(),
        })
    }

    pub async fn post(&self, entry: &DiaryEntry) -> Result<()> {
        let Some(token) = self.token.as_deref() else {
            bail!("DISCORD_BOT_TOKEN is not set");
        };

        let url = format!("{API_BASE}/channels/{}/messages", self.channel_id);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bot {token}"))
            .json(&json!({ "content": render_message(entry) }))
            .send()
            .await
            .context("Discord request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Discord returned {status}: {body}");
        }
        Ok(())
    }
}

/// Title and body, cut to the message limit.
pub fn render_message(entry: &DiaryEntry) -> String {
    let message = format!("**{}** {}\n\n{}", entry.title, entry.mood, entry.content);
    if message.chars().count() <= MESSAGE_LIMIT_CHARS {
        return message;
    }
    let mut truncated: String = message.chars().take(MESSAGE_LIMIT_CHARS - 1).collect();
    truncated.push('…');
    truncated
}
