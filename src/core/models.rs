use serde::{Deserialize, Deserializer, Serialize};

/// Inbound request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub name: Option<String>,
    pub cx: Option<String>,
    pub cse_key: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub debug: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

/// A search hit as returned by either search strategy, before condensing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSearchResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub display_link: String,
}

/// Rank-numbered, trimmed search result sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultItem {
    pub rank: usize,
    pub title: String,
    pub link: String,
    pub snippet: String,
    #[serde(rename = "displayLink")]
    pub source_label: String,
}

/// Trace of which branches ran during one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub cse_attempted: bool,
    pub cse_ok: bool,
    pub ddg_used: bool,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_model: Option<String>,
    pub openrouter_ok: bool,
    pub openrouter_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openrouter_fallback_status: Option<u16>,
}

impl Diagnostics {
    #[must_use]
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryResult {
    pub summary: String,
    #[serde(rename = "rawCount")]
    pub result_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}
