//! Diary persistence: markdown files per entry, optional Discord broadcast.

mod discord;

pub use discord::{render_message, DiscordPoster};

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{info, warn};

use crate::generator::format_date_ja;
use crate::models::{DiaryEntry, EntryKind};
use crate::settings::{OutputSettings, Settings};

const PREVIEW_CHARS: usize = 200;

/// Whose diary a writer manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DiaryOwner {
    User,
    #[value(name = "kanna")]
    Persona,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiaryStats {
    pub total: usize,
    /// `YYYY-MM` -> daily entries that month
    pub by_month: BTreeMap<String, usize>,
    pub first: Option<NaiveDate>,
    pub last: Option<NaiveDate>,
}

pub struct DiaryWriter {
    storage: PathBuf,
    output: OutputSettings,
    persona_name: String,
    discord: Option<DiscordPoster>,
}

impl DiaryWriter {
    pub fn new(settings: &Settings, owner: DiaryOwner) -> Result<Self> {
        let storage = match owner {
            DiaryOwner::User => settings.diary.user_storage_path.clone(),
            DiaryOwner::Persona => settings.diary.kanna_storage_path.clone(),
        };

        let discord = match (&settings.output.discord_channel_id, settings.output.post_to_discord) {
            (Some(channel_id), true) => Some(DiscordPoster::from_env(channel_id.clone())?),
            _ => None,
        };

        Ok(Self {
            storage,
            output: settings.output.clone(),
            persona_name: settings.persona.name.clone(),
            discord,
        })
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage
    }

    pub fn file_path(&self, date: NaiveDate, kind: EntryKind) -> PathBuf {
        let name = match kind {
            EntryKind::Daily => format!("{}.md", date.format("%Y-%m-%d")),
            EntryKind::Weekly => format!("{}-weekly.md", date.format("%Y-%m-%d")),
            EntryKind::Monthly => format!("{}-monthly.md", date.format("%Y-%m")),
        };
        self.storage.join(name)
    }

    /// Save, then broadcast. Returns the saved path when file output is on.
    /// A failed broadcast is logged and does not fail the write.
    pub async fn write(&self, entry: &DiaryEntry) -> Result<Option<PathBuf>> {
        let saved = if self.output.save_to_file {
            Some(self.save_to_file(entry)?)
        } else {
            None
        };

        if let Some(discord) = &self.discord {
            match discord.post(entry).await {
                Ok(()) => info!("Posted '{}' to Discord", entry.title),
                Err(err) => warn!("Discord post failed, entry kept on disk only: {err:#}"),
            }
        }

        Ok(saved)
    }

    fn save_to_file(&self, entry: &DiaryEntry) -> Result<PathBuf> {
        let path = self.file_path(entry.date, entry.kind);
        fs::create_dir_all(&self.storage)
            .with_context(|| format!("Failed to create {}", self.storage.display()))?;
        fs::write(&path, &entry.content)
            .with_context(|| format!("Failed to write diary to {}", path.display()))?;
        info!("Saved diary to {}", path.display());
        Ok(path)
    }

    /// Daily entry for `date`, if one was written.
    pub fn read(&self, date: NaiveDate) -> Result<Option<DiaryEntry>> {
        let path = self.file_path(date, EntryKind::Daily);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read diary {}", path.display()))?;
        Ok(Some(self.stored_entry(date, content)))
    }

    /// Daily entries containing `keyword`, oldest first, content cut to a
    /// preview.
    pub fn search(&self, keyword: &str) -> Result<Vec<DiaryEntry>> {
        let mut results = Vec::new();
        for (date, path) in self.daily_files()? {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read diary {}", path.display()))?;
            if content.contains(keyword) {
                results.push(self.stored_entry(date, preview(&content)));
            }
        }
        Ok(results)
    }

    pub fn stats(&self) -> Result<DiaryStats> {
        let files = self.daily_files()?;
        let mut stats = DiaryStats {
            total: files.len(),
            first: files.first().map(|(date, _)| *date),
            last: files.last().map(|(date, _)| *date),
            ..DiaryStats::default()
        };
        for (date, _) in &files {
            *stats
                .by_month
                .entry(date.format("%Y-%m").to_string())
                .or_default() += 1;
        }
        Ok(stats)
    }

    fn stored_entry(&self, date: NaiveDate, content: String) -> DiaryEntry {
        let title = format!("{}の日記 - {}", self.persona_name, format_date_ja(date));
        DiaryEntry::from_stored(date, EntryKind::Daily, title, content)
    }

    /// `YYYY-MM-DD.md` files in storage, sorted by date.
    fn daily_files(&self) -> Result<Vec<(NaiveDate, PathBuf)>> {
        if !self.storage.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.storage)
            .with_context(|| format!("Failed to list {}", self.storage.display()))?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if let Ok(date) = NaiveDate::parse_from_str(stem, "%Y-%m-%d") {
                files.push((date, path));
            }
        }
        files.sort_by_key(|(date, _)| *date);
        Ok(files)
    }
}

fn preview(content: &str) -> String {
    if content.chars().count() <= PREVIEW_CHARS {
        return content.to_string();
    }
    let mut preview: String = content.chars().take(PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
