//! Primary/fallback model selection

use serde_json::Value;
use tracing::{error, info};

use super::client::{ChatCompletion, ChatReply, ChatRequest};
use crate::core::models::Diagnostics;
use crate::errors::SummaryError;

/// Primary-call statuses that trigger the fallback model. This is local
/// policy, not a documented provider contract.
pub const RETRYABLE_MODEL_STATUSES: [u16; 4] = [400, 403, 404, 405];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChain {
    pub primary: String,
    pub fallback: Option<String>,
}

impl ModelChain {
    #[must_use]
    pub fn new(primary: impl Into<String>, fallback: Option<String>) -> Self {
        Self {
            primary: primary.into(),
            fallback,
        }
    }

    #[must_use]
    pub fn should_fall_back(status: u16) -> bool {
        RETRYABLE_MODEL_STATUSES.contains(&status)
    }

    /// Calls the primary model, then the fallback model once if the primary
    /// status is retryable. Returns the trimmed reply text.
    ///
    /// # Errors
    ///
    /// Returns [`SummaryError::UpstreamFailed`] when no call succeeds, or a
    /// parse error if a successful reply body is not JSON.
    pub async fn complete(
        &self,
        completion: &dyn ChatCompletion,
        system: &str,
        prompt: &str,
        diagnostics: &mut Diagnostics,
    ) -> Result<String, SummaryError> {
        let primary = completion
            .complete(&ChatRequest::new(&self.primary, system, prompt))
            .await
            .map_err(|e| {
                error!(model = %self.primary, error = %e, "OpenRouter transport error");
                SummaryError::UpstreamFailed {
                    status: None,
                    fallback_status: None,
                }
            })?;
        diagnostics.openrouter_status = Some(primary.status);

        let reply = if primary.is_success() {
            primary
        } else {
            error!(status = primary.status, body = %primary.body, "OpenRouter error");

            let fallback_model = self
                .fallback
                .as_deref()
                .filter(|_| Self::should_fall_back(primary.status));
            let Some(fallback_model) = fallback_model else {
                return Err(SummaryError::UpstreamFailed {
                    status: Some(primary.status),
                    fallback_status: None,
                });
            };

            info!(model = %fallback_model, "Retrying with fallback model");
            diagnostics.fallback_model = Some(fallback_model.to_string());
            let fallback = self
                .call_fallback(completion, fallback_model, system, prompt, primary.status)
                .await?;
            diagnostics.openrouter_fallback_status = Some(fallback.status);

            if !fallback.is_success() {
                error!(
                    status = fallback.status,
                    body = %fallback.body,
                    "OpenRouter fallback error"
                );
                return Err(SummaryError::UpstreamFailed {
                    status: Some(primary.status),
                    fallback_status: Some(fallback.status),
                });
            }
            fallback
        };

        let json: Value = serde_json::from_str(&reply.body)?;
        Ok(super::client::extract_reply_text(&json))
    }

    async fn call_fallback(
        &self,
        completion: &dyn ChatCompletion,
        model: &str,
        system: &str,
        prompt: &str,
        primary_status: u16,
    ) -> Result<ChatReply, SummaryError> {
        completion
            .complete(&ChatRequest::new(model, system, prompt))
            .await
            .map_err(|e| {
                error!(model = %model, error = %e, "OpenRouter fallback transport error");
                SummaryError::UpstreamFailed {
                    status: Some(primary_status),
                    fallback_status: None,
                }
            })
    }
}
