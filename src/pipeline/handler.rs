use tracing::{error, info};

use crate::ai::ModelChain;
use crate::ai::client::{ChatCompletion, OpenRouterClient};
use crate::ai::prompt_builder::{SYSTEM_INSTRUCTION, build_prompt, sanitize_subject_name};
use crate::core::config::{AppConfig, DEFAULT_CSE_CX};
use crate::core::models::{Diagnostics, SummaryRequest, SummaryResult};
use crate::errors::SummaryError;
use crate::search::{self, DuckDuckGoStrategy, GoogleCseStrategy, SearchQuery, SearchStrategy};

use super::condense::condense;

/// Search parameters used when the request does not override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchDefaults {
    pub cse_key: Option<String>,
    pub cx: String,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            cse_key: None,
            cx: DEFAULT_CSE_CX.to_string(),
        }
    }
}

/// A failed request, with the diagnostics collected up to the failure when
/// the caller asked for them.
#[derive(Debug)]
pub struct SummaryFailure {
    pub error: SummaryError,
    pub diagnostics: Option<Diagnostics>,
}

pub struct SearchSummaryHandler {
    strategies: Vec<Box<dyn SearchStrategy>>,
    completion: Option<Box<dyn ChatCompletion>>,
    models: ModelChain,
    defaults: SearchDefaults,
}

impl SearchSummaryHandler {
    /// `completion` is `None` when no model credential is configured; the
    /// request then fails with 500 after search has run.
    #[must_use]
    pub fn new(
        strategies: Vec<Box<dyn SearchStrategy>>,
        completion: Option<Box<dyn ChatCompletion>>,
        models: ModelChain,
        defaults: SearchDefaults,
    ) -> Self {
        Self {
            strategies,
            completion,
            models,
            defaults,
        }
    }

    /// CSE first, DuckDuckGo HTML second, OpenRouter for completions.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let strategies: Vec<Box<dyn SearchStrategy>> = vec![
            Box::new(GoogleCseStrategy::new(config.cse_base_url.clone())),
            Box::new(DuckDuckGoStrategy::new(config.duckduckgo_html_url.clone())),
        ];

        let completion = config.openrouter_api_key.clone().map(|key| {
            Box::new(OpenRouterClient::new(
                key,
                config.openrouter_base_url.clone(),
                config.site_url.clone(),
            )) as Box<dyn ChatCompletion>
        });

        let models = ModelChain::new(
            config.openrouter_model.clone(),
            Some(config.openrouter_fallback_model.clone()),
        );

        let defaults = SearchDefaults {
            cse_key: config.google_api_key.clone(),
            cx: config
                .google_cse_cx
                .clone()
                .unwrap_or_else(|| DEFAULT_CSE_CX.to_string()),
        };

        Self::new(strategies, completion, models, defaults)
    }

    /// Request-supplied `cseKey`/`cx` override the configured values.
    #[must_use]
    pub fn search_query(&self, term: &str, request: &SummaryRequest) -> SearchQuery {
        let non_empty = |v: &Option<String>| v.clone().filter(|s| !s.trim().is_empty());

        SearchQuery {
            term: term.to_string(),
            cse_key: non_empty(&request.cse_key).or_else(|| self.defaults.cse_key.clone()),
            cx: non_empty(&request.cx).unwrap_or_else(|| self.defaults.cx.clone()),
        }
    }

    /// Runs the whole pipeline for one request.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryFailure`] for a missing name, a missing model
    /// credential, or a failed model call. Search failures never surface.
    #[tracing::instrument(level = "info", skip(self, request), fields(debug = request.debug))]
    pub async fn handle(&self, request: &SummaryRequest) -> Result<SummaryResult, SummaryFailure> {
        let mut diagnostics = Diagnostics::new(&self.models.primary);

        match self.execute(request, &mut diagnostics).await {
            Ok((summary, result_count)) => {
                diagnostics.openrouter_ok = true;
                info!(result_count, "Summary generated");
                Ok(SummaryResult {
                    summary,
                    result_count,
                    diagnostics: request.debug.then_some(diagnostics),
                })
            }
            Err(error) => Err(SummaryFailure {
                error,
                diagnostics: request.debug.then_some(diagnostics),
            }),
        }
    }

    async fn execute(
        &self,
        request: &SummaryRequest,
        diagnostics: &mut Diagnostics,
    ) -> Result<(String, usize), SummaryError> {
        let name = request
            .name
            .as_deref()
            .map(sanitize_subject_name)
            .filter(|n| !n.is_empty())
            .ok_or(SummaryError::MissingName)?;

        let query = self.search_query(&name, request);
        let raw = search::acquire(&self.strategies, &query, diagnostics).await;

        let condensed = condense(&raw);
        let prompt = build_prompt(&name, &condensed);

        let Some(completion) = self.completion.as_deref() else {
            error!("OPENROUTER_API_KEY is not configured");
            return Err(SummaryError::MissingApiKey);
        };

        let summary = self
            .models
            .complete(completion, SYSTEM_INSTRUCTION, &prompt, diagnostics)
            .await?;

        Ok((summary, condensed.len()))
    }
}
