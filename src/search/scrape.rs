//! DuckDuckGo HTML result extraction.
//!
//! Kept free of any I/O. The parsed `Html` document is `!Send`, so callers
//! hand in the page body after their last `.await`.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use super::MAX_RESULTS;
use crate::core::config::DEFAULT_DUCKDUCKGO_HTML_URL;

/// Selector for DuckDuckGo's organic result anchors.
pub const RESULT_ANCHOR_SELECTOR: &str = "a.result__a";

static DEFAULT_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_DUCKDUCKGO_HTML_URL).expect("static url parse"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedLink {
    pub title: String,
    pub link: String,
}

/// Extracts up to [`MAX_RESULTS`] organic result links, in document order.
/// Relative links resolve against the public DuckDuckGo HTML endpoint.
#[must_use]
pub fn scrape(html: &str) -> Vec<ScrapedLink> {
    scrape_at(html, &DEFAULT_BASE)
}

/// Like [`scrape`], resolving relative links against `base`, the page the
/// HTML was fetched from.
#[must_use]
pub fn scrape_at(html: &str, base: &Url) -> Vec<ScrapedLink> {
    let Ok(selector) = Selector::parse(RESULT_ANCHOR_SELECTOR) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    document
        .select(&selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            Some(ScrapedLink {
                title: collapse_whitespace(&anchor.text().collect::<String>()),
                link: normalize_link(href, base),
            })
        })
        .take(MAX_RESULTS)
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves an anchor `href` against `base`. DuckDuckGo wraps targets in
/// `/l/?uddg=<target>` redirects; those are unwrapped.
#[must_use]
pub fn normalize_link(href: &str, base: &Url) -> String {
    let Ok(url) = base.join(href) else {
        return href.to_string();
    };

    if url.path().starts_with("/l/")
        && let Some((_, target)) = url.query_pairs().find(|(k, _)| k == "uddg")
        && !target.is_empty()
    {
        return target.into_owned();
    }

    url.into()
}
