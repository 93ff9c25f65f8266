use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};

use super::{CompletionRequest, TextModel};
use crate::error::LlmError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Client for any endpoint speaking the OpenAI chat-completions protocol.
pub struct OpenAiCompatibleClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiCompatibleClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    /// Endpoint from `AI_BASE_URL`, then `configured`, then the OpenAI default.
    /// Key from `OPENAI_API_KEY`, then `GLM_API_KEY`.
    pub fn from_env(configured: Option<&str>) -> Result<Self, LlmError> {
        let base_url = std::env::var("AI_BASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .or_else(|| configured.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = std::env::var("OPENAI_API_KEY")
            .or_else(|_| std::env::var("GLM_API_KEY"))
            .ok();
        Self::new(base_url, api_key)
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextModel for OpenAiCompatibleClient {
    fn name(&self) -> &'static str {
        "openai-compatible"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        let start = Instant::now();

        let body = json!({
            "model": request.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        debug!("chat completion request: model={}", request.model);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let raw: Value = response.json().await?;
        let content = raw["choices"][0]["message"]["content"]
            .as_str()
            .filter(|content| !content.is_empty())
            .ok_or(LlmError::EmptyResponse)?
            .to_string();

        debug!(
            "chat completion finished in {}ms ({} chars)",
            start.elapsed().as_millis(),
            content.chars().count()
        );

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_endpoint() {
        let client = OpenAiCompatibleClient::new("https://example.test/v4/", Some("k".into())).unwrap();
        assert_eq!(client.endpoint(), "https://example.test/v4/chat/completions");
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let client = OpenAiCompatibleClient::new("http://127.0.0.1:9", Some("  ".into())).unwrap();
        let err = client
            .complete(CompletionRequest {
                model: "m".into(),
                system: "s".into(),
                user: "u".into(),
                max_tokens: 10,
                temperature: 0.0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }
}
