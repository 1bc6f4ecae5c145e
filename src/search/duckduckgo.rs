//! DuckDuckGo HTML search strategy (fallback when CSE yields nothing)

use async_trait::async_trait;
use tracing::warn;
use url::Url;

use super::scrape::{ScrapedLink, scrape, scrape_at};
use super::{SearchOutcome, SearchQuery, SearchStrategy, http_client};
use crate::core::models::{Diagnostics, RawSearchResult};

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; PressenceBot/1.0)";

pub struct DuckDuckGoStrategy {
    html_url: String,
}

impl DuckDuckGoStrategy {
    #[must_use]
    pub fn new(html_url: impl Into<String>) -> Self {
        Self {
            html_url: html_url.into(),
        }
    }

    /// Fetches the result page, returning its URL alongside the body so
    /// relative links can be resolved against it.
    async fn fetch_html(&self, term: &str) -> anyhow::Result<(Url, String)> {
        let url = Url::parse_with_params(&self.html_url, &[("q", term)])?;
        let response = http_client()
            .get(url.clone())
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("DuckDuckGo HTML search returned status {status}");
        }

        Ok((url, response.text().await?))
    }
}

/// Converts scraped anchors into search results. The lightweight scrape
/// has no snippet or source label.
#[must_use]
pub fn results_from_html(html: &str) -> Vec<RawSearchResult> {
    into_results(scrape(html))
}

fn into_results(hits: Vec<ScrapedLink>) -> Vec<RawSearchResult> {
    hits.into_iter()
        .map(|hit| RawSearchResult {
            title: hit.title,
            link: hit.link,
            snippet: String::new(),
            display_link: String::new(),
        })
        .collect()
}

#[async_trait]
impl SearchStrategy for DuckDuckGoStrategy {
    fn name(&self) -> &'static str {
        "duckduckgo_html"
    }

    async fn attempt(&self, query: &SearchQuery, diagnostics: &mut Diagnostics) -> SearchOutcome {
        diagnostics.ddg_used = true;
        match self.fetch_html(&query.term).await {
            Ok((page_url, html)) => {
                let items = into_results(scrape_at(&html, &page_url));
                if items.is_empty() {
                    warn!("DuckDuckGo fallback returned no result anchors");
                }
                SearchOutcome::from_items(items)
            }
            Err(e) => {
                warn!(error = %e, "DuckDuckGo fallback failed");
                SearchOutcome::Empty
            }
        }
    }
}
