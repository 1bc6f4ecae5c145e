use std::env;

use url::Url;

pub const DEFAULT_CSE_CX: &str = "901473b4d9b1445ec";
pub const DEFAULT_CSE_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_DUCKDUCKGO_HTML_URL: &str = "https://duckduckgo.com/html/";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_PRIMARY_MODEL: &str = "openrouter/auto";
pub const DEFAULT_FALLBACK_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_SITE_URL: &str = "https://pressence-x.netlify.app/";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub google_api_key: Option<String>,
    pub google_cse_cx: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: String,
    pub openrouter_fallback_model: String,
    pub cse_base_url: String,
    pub duckduckgo_html_url: String,
    pub openrouter_base_url: String,
    pub site_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            google_api_key: get("GOOGLE_API_KEY").or_else(|| get("GOOGLE_CSE_KEY")),
            google_cse_cx: get("GOOGLE_CSE_CX"),
            openrouter_api_key: get("OPENROUTER_API_KEY"),
            openrouter_model: get("OPENROUTER_MODEL")
                .unwrap_or_else(|| DEFAULT_PRIMARY_MODEL.to_string()),
            openrouter_fallback_model: get("OPENROUTER_FALLBACK_MODEL")
                .unwrap_or_else(|| DEFAULT_FALLBACK_MODEL.to_string()),
            cse_base_url: validated_url(
                "GOOGLE_CSE_BASE_URL",
                get("GOOGLE_CSE_BASE_URL"),
                DEFAULT_CSE_BASE_URL,
            )?,
            duckduckgo_html_url: validated_url(
                "DUCKDUCKGO_HTML_URL",
                get("DUCKDUCKGO_HTML_URL"),
                DEFAULT_DUCKDUCKGO_HTML_URL,
            )?,
            openrouter_base_url: validated_url(
                "OPENROUTER_BASE_URL",
                get("OPENROUTER_BASE_URL"),
                DEFAULT_OPENROUTER_BASE_URL,
            )?
            .trim_end_matches('/')
            .to_string(),
            site_url: validated_url("SITE_URL", get("SITE_URL"), DEFAULT_SITE_URL)?,
        })
    }
}

fn validated_url(key: &str, value: Option<String>, default: &str) -> Result<String, String> {
    match value {
        Some(raw) => Url::parse(&raw)
            .map(|_| raw)
            .map_err(|e| format!("{key}: {e}")),
        None => Ok(default.to_string()),
    }
}
