//! Search result acquisition
//!
//! Results come from an ordered list of [`SearchStrategy`] objects. Each is
//! tried in turn until one yields a non-empty result set. Strategies never
//! fail the request: upstream problems are logged and reported as
//! [`SearchOutcome::Empty`].

pub mod cse;
pub mod duckduckgo;
pub mod scrape;

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

use crate::core::models::{Diagnostics, RawSearchResult};

pub use cse::GoogleCseStrategy;
pub use duckduckgo::DuckDuckGoStrategy;

/// Maximum number of results kept from any search source.
pub const MAX_RESULTS: usize = 6;

pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(5);

static SEARCH_HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(SEARCH_TIMEOUT)
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Shared HTTP client for search upstreams.
pub(crate) fn http_client() -> &'static Client {
    &SEARCH_HTTP_CLIENT
}

/// Per-request search parameters after request overrides are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub cse_key: Option<String>,
    pub cx: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Results(Vec<RawSearchResult>),
    Empty,
}

impl SearchOutcome {
    /// Wraps a result list, mapping an empty list to [`SearchOutcome::Empty`].
    #[must_use]
    pub fn from_items(mut items: Vec<RawSearchResult>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            items.truncate(MAX_RESULTS);
            Self::Results(items)
        }
    }
}

#[async_trait]
pub trait SearchStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Attempts the search, recording what happened in `diagnostics`.
    async fn attempt(&self, query: &SearchQuery, diagnostics: &mut Diagnostics) -> SearchOutcome;
}

/// Runs `strategies` in order and returns the first non-empty result list,
/// or an empty list when every strategy comes up empty.
pub async fn acquire(
    strategies: &[Box<dyn SearchStrategy>],
    query: &SearchQuery,
    diagnostics: &mut Diagnostics,
) -> Vec<RawSearchResult> {
    for strategy in strategies {
        match strategy.attempt(query, diagnostics).await {
            SearchOutcome::Results(items) => {
                info!(strategy = strategy.name(), count = items.len(), "Search results acquired");
                return items;
            }
            SearchOutcome::Empty => {
                info!(strategy = strategy.name(), "Search strategy produced no results");
            }
        }
    }
    Vec::new()
}
