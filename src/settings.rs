use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::collection::KeywordTable;
use crate::error::ConfigError;

pub const DEFAULT_SETTINGS_PATH: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiarySettings {
    pub user_storage_path: PathBuf,
    pub kanna_storage_path: PathBuf,
}

impl Default for DiarySettings {
    fn default() -> Self {
        Self {
            user_storage_path: PathBuf::from("./diaries/user"),
            kanna_storage_path: PathBuf::from("./diaries/kanna"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonaSettings {
    pub name: String,
    /// `MM-DD`
    pub birthday: String,
}

impl Default for PersonaSettings {
    fn default() -> Self {
        Self {
            name: "かんな".into(),
            birthday: "02-14".into(),
        }
    }
}

impl PersonaSettings {
    /// Parsed `(month, day)`.
    pub fn birthday_month_day(&self) -> Result<(u32, u32), ConfigError> {
        let invalid = || ConfigError::InvalidBirthday(self.birthday.clone());
        let (month, day) = self.birthday.split_once('-').ok_or_else(invalid)?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(invalid());
        }
        Ok((month, day))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiscordSourceSettings {
    pub enabled: bool,
    pub channels: Vec<String>,
    pub message_limit: u32,
}

impl Default for DiscordSourceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            channels: Vec::new(),
            message_limit: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitHubSourceSettings {
    pub enabled: bool,
    pub repo: String,
}

impl Default for GitHubSourceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            repo: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarSourceSettings {
    pub enabled: bool,
    pub calendar_id: String,
}

impl Default for CalendarSourceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            calendar_id: "primary".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObsidianSourceSettings {
    pub enabled: bool,
    pub vault_path: PathBuf,
}

impl Default for ObsidianSourceSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            vault_path: PathBuf::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesSettings {
    pub discord: DiscordSourceSettings,
    pub github: GitHubSourceSettings,
    pub calendar: CalendarSourceSettings,
    pub obsidian: ObsidianSourceSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalitySettings {
    pub name: String,
    pub tone: String,
    pub emotional_range: String,
}

impl Default for PersonalitySettings {
    fn default() -> Self {
        Self {
            name: "かんな".into(),
            tone: "friendly".into(),
            emotional_range: "high".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationSettings {
    pub ai_model: String,
    /// Model for emotion classification; falls back to `ai_model`.
    pub classifier_model: Option<String>,
    /// OpenAI-compatible endpoint root; `AI_BASE_URL` overrides it.
    pub base_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub personality: PersonalitySettings,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            ai_model: "gpt-4o-mini".into(),
            classifier_model: None,
            base_url: None,
            max_tokens: 2000,
            temperature: 0.8,
            personality: PersonalitySettings::default(),
        }
    }
}

impl GenerationSettings {
    /// Model used for emotion classification, given an `AI_MODEL` override.
    pub fn classifier_model_name(&self, env_override: Option<String>) -> String {
        env_override
            .filter(|model| !model.trim().is_empty())
            .or_else(|| self.classifier_model.clone())
            .unwrap_or_else(|| self.ai_model.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutputSettings {
    pub save_to_file: bool,
    pub post_to_discord: bool,
    pub discord_channel_id: Option<String>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            save_to_file: true,
            post_to_discord: false,
            discord_channel_id: None,
        }
    }
}

/// Raw analysis options as written in the file. Validated into
/// [`crate::collection::AnalysisConfig`] before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSettings {
    #[serde(default)]
    pub emotion_keywords: Option<KeywordTable>,
    #[serde(default = "default_importance_threshold")]
    pub importance_threshold: f64,
}

fn default_importance_threshold() -> f64 {
    0.6
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            emotion_keywords: Some(KeywordTable::default()),
            importance_threshold: default_importance_threshold(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub diary: DiarySettings,
    #[serde(alias = "kanna")]
    pub persona: PersonaSettings,
    pub sources: SourcesSettings,
    pub generation: GenerationSettings,
    pub output: OutputSettings,
    pub analysis: AnalysisSettings,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents, path)
    }

    fn from_json(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let settings: Settings =
            serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.persona.birthday_month_day()?;
        Ok(settings)
    }

    /// Write these settings as pretty JSON, creating parent directories.
    pub fn persist(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(self)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }
}
