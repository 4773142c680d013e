//! OpenAI chat model using the chat completions API.
//!
//! This module is only available when the `openai` feature is enabled.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error};

use crate::error::{RagError, Result};
use crate::model::{ChatModel, ChatRequest};

/// The default OpenAI API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const PROVIDER: &str = "OpenAI";

/// A [`ChatModel`] backed by the OpenAI chat completions API.
///
/// Uses `reqwest` to call `{base_url}/chat/completions` directly. The base
/// URL can point at any OpenAI-compatible endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use docqa_rag::openai::OpenAIChatModel;
///
/// let model = OpenAIChatModel::new("sk-...")?;
/// let reply = model.complete(request).await?;
/// ```
pub struct OpenAIChatModel {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAIChatModel {
    /// Create a new client with the given API key and the default base URL.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(model_error("API key must not be empty"));
        }

        Ok(Self { client: reqwest::Client::new(), api_key, base_url: DEFAULT_BASE_URL.into() })
    }

    /// Set the API base URL (e.g. a proxy or compatible server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The API base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for OpenAIChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIChatModel")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ── OpenAI API response types ──────────────────────────────────────

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

fn model_error(message: impl Into<String>) -> RagError {
    RagError::ModelError { provider: PROVIDER.into(), message: message.into() }
}

// ── ChatModel implementation ───────────────────────────────────────

#[async_trait]
impl ChatModel for OpenAIChatModel {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        debug!(
            provider = PROVIDER,
            model = %request.model,
            message_count = request.messages.len(),
            "requesting chat completion"
        );

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(provider = PROVIDER, error = %e, "request failed");
                model_error(format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);

            error!(provider = PROVIDER, %status, "API error");
            return Err(model_error(format!("API returned {status}: {detail}")));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            error!(provider = PROVIDER, error = %e, "failed to parse response");
            model_error(format!("failed to parse response: {e}"))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| model_error("API returned no completion text"))
    }

    fn provider(&self) -> &str {
        PROVIDER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_key() {
        assert!(matches!(OpenAIChatModel::new(""), Err(RagError::ModelError { .. })));
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let model = OpenAIChatModel::new("sk-test").unwrap().with_base_url("http://localhost:8080/v1/");
        assert_eq!(model.base_url(), "http://localhost:8080/v1");
        assert!(!format!("{model:?}").contains("sk-test"));
    }
}
