//! Text model seam shared by emotion classification and narrative generation.

mod openai;

pub use openai::OpenAiCompatibleClient;

use async_trait::async_trait;

use crate::error::LlmError;

/// A single system + user prompt round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[async_trait]
pub trait TextModel: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Returns the raw text of the first completion choice. Callers must treat
    /// it as untrusted.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
