use std::path::PathBuf;

use thiserror::Error;

/// Fatal configuration problems. These abort a run before any collection happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings from {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("analysis.emotionKeywords is missing or empty")]
    MissingKeywordTable,

    #[error("emotion keyword category '{0}' has no keywords")]
    EmptyKeywordCategory(String),

    #[error("emotion keyword category '{0}' contains a blank keyword")]
    BlankKeyword(String),

    #[error("analysis.importanceThreshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),

    #[error("persona birthday must be MM-DD, got '{0}'")]
    InvalidBirthday(String),
}

/// Failures talking to the text model endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured (set OPENAI_API_KEY or GLM_API_KEY)")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response carried no message content")]
    EmptyResponse,
}

/// Anything that sends the emotion analyzer down the fallback path.
#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("no JSON object found in classifier output")]
    NoJson,

    #[error("classifier output is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("classifier output is not a JSON object")]
    NotAnObject,

    #[error("classifier output is missing required field '{0}'")]
    MissingField(&'static str),
}
