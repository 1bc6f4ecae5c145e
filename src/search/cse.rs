//! Google Custom Search JSON API strategy

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use super::{MAX_RESULTS, SearchOutcome, SearchQuery, SearchStrategy, http_client};
use crate::core::models::{Diagnostics, RawSearchResult};

#[derive(Debug, Default, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CseItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    display_link: String,
}

impl From<CseItem> for RawSearchResult {
    fn from(item: CseItem) -> Self {
        Self {
            title: item.title,
            link: item.link,
            snippet: item.snippet,
            display_link: item.display_link,
        }
    }
}

/// Parses a CSE response body, keeping at most [`MAX_RESULTS`] items.
/// A body without an `items` array yields an empty list.
pub fn parse_cse_body(body: &str) -> Result<Vec<RawSearchResult>, serde_json::Error> {
    let parsed: CseResponse = serde_json::from_str(body)?;
    Ok(parsed
        .items
        .into_iter()
        .take(MAX_RESULTS)
        .map(RawSearchResult::from)
        .collect())
}

pub fn build_cse_url(base_url: &str, query: &SearchQuery, key: &str) -> Result<Url, url::ParseError> {
    Url::parse_with_params(
        base_url,
        &[
            ("q", query.term.as_str()),
            ("key", key),
            ("cx", query.cx.as_str()),
        ],
    )
}

pub struct GoogleCseStrategy {
    base_url: String,
}

impl GoogleCseStrategy {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    async fn fetch(&self, query: &SearchQuery, key: &str) -> anyhow::Result<Vec<RawSearchResult>> {
        let url = build_cse_url(&self.base_url, query, key)?;
        let response = http_client().get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Google CSE returned status {status}");
        }

        let body = response.text().await?;
        Ok(parse_cse_body(&body)?)
    }
}

#[async_trait]
impl SearchStrategy for GoogleCseStrategy {
    fn name(&self) -> &'static str {
        "google_cse"
    }

    async fn attempt(&self, query: &SearchQuery, diagnostics: &mut Diagnostics) -> SearchOutcome {
        let Some(key) = query.cse_key.as_deref() else {
            return SearchOutcome::Empty;
        };

        diagnostics.cse_attempted = true;
        match self.fetch(query, key).await {
            Ok(items) => {
                diagnostics.cse_ok = true;
                SearchOutcome::from_items(items)
            }
            Err(e) => {
                warn!(error = %e, "CSE fetch failed, will try DuckDuckGo fallback");
                SearchOutcome::Empty
            }
        }
    }
}
