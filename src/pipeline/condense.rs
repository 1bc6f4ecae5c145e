use crate::core::models::{RawSearchResult, SearchResultItem};
use crate::search::MAX_RESULTS;

/// Ranks results 1..N in source order and trims their text fields.
#[must_use]
pub fn condense(items: &[RawSearchResult]) -> Vec<SearchResultItem> {
    items
        .iter()
        .take(MAX_RESULTS)
        .enumerate()
        .map(|(idx, it)| SearchResultItem {
            rank: idx + 1,
            title: it.title.trim().to_string(),
            link: it.link.trim().to_string(),
            snippet: it.snippet.trim().to_string(),
            source_label: it.display_link.trim().to_string(),
        })
        .collect()
}
