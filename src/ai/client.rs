//! Chat-completion client module
//!
//! Encapsulates the OpenRouter chat-completions call. The HTTP status is
//! returned to the caller rather than turned into an error so the model
//! fallback policy can inspect it.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use crate::errors::SummaryError;

pub const MODEL_TIMEOUT: Duration = Duration::from_secs(30);
pub const TEMPERATURE: f32 = 0.6;
pub const MAX_TOKENS: u32 = 320;
pub const X_TITLE: &str = "Pressence360 Search Summary";

static MODEL_HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(MODEL_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// System + user conversation with the standard sampling settings.
    #[must_use]
    pub fn new(model: &str, system: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: ChatRole::System,
                    content: system.to_string(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: prompt.to_string(),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Raw upstream reply: status code plus unparsed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub status: u16,
    pub body: String,
}

impl ChatReply {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends one completion request. Only transport failures are errors;
    /// any HTTP status comes back as a [`ChatReply`].
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, SummaryError>;
}

pub struct OpenRouterClient {
    api_key: String,
    base_url: String,
    site_url: String,
}

impl OpenRouterClient {
    #[must_use]
    pub fn new(api_key: String, base_url: String, site_url: String) -> Self {
        Self {
            api_key,
            base_url,
            site_url,
        }
    }

    fn headers(&self) -> Result<reqwest::header::HeaderMap, SummaryError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth_value = format!("Bearer {}", self.api_key)
            .parse()
            .map_err(|e| SummaryError::HttpError(format!("Invalid Authorization header: {e}")))?;
        headers.insert("Authorization", auth_value);

        let json_value: reqwest::header::HeaderValue = "application/json"
            .parse()
            .map_err(|e| SummaryError::HttpError(format!("Invalid Content-Type header: {e}")))?;
        headers.insert("Content-Type", json_value.clone());
        headers.insert("Accept", json_value);

        let referer: reqwest::header::HeaderValue = self
            .site_url
            .parse()
            .map_err(|e| SummaryError::HttpError(format!("Invalid Referer header: {e}")))?;
        headers.insert("Referer", referer.clone());
        headers.insert("HTTP-Referer", referer);

        let title_value = X_TITLE
            .parse()
            .map_err(|e| SummaryError::HttpError(format!("Invalid X-Title header: {e}")))?;
        headers.insert("X-Title", title_value);

        Ok(headers)
    }
}

#[async_trait]
impl ChatCompletion for OpenRouterClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, SummaryError> {
        #[cfg(feature = "debug-logs")]
        info!("Using OpenRouter request:\n{:?}", request);

        #[cfg(not(feature = "debug-logs"))]
        info!(model = %request.model, "Sending chat completion request");

        let response = MODEL_HTTP_CLIENT
            .post(format!("{}/chat/completions", self.base_url))
            .headers(self.headers()?)
            .json(request)
            .send()
            .await
            .map_err(|e| SummaryError::HttpError(format!("OpenRouter request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_else(|e| {
            format!("Failed to read response body (status {status}): {e}")
        });

        Ok(ChatReply { status, body })
    }
}

/// Pulls `choices[0].message.content` out of a completion body, trimmed.
/// A body missing that path yields an empty string.
#[must_use]
pub fn extract_reply_text(response_json: &Value) -> String {
    response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
