use thiserror::Error;

/// Public message returned for any failure whose details must stay server-side.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal error";

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Missing name")]
    MissingName,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Missing OpenRouter API key")]
    MissingApiKey,

    #[error("OpenRouter request failed")]
    UpstreamFailed {
        status: Option<u16>,
        fallback_status: Option<u16>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to parse upstream response: {0}")]
    ParseError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SummaryError {
    /// HTTP status code the API layer answers with for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::MissingName | Self::InvalidBody(_) => 400,
            Self::MethodNotAllowed => 405,
            Self::UpstreamFailed { .. } => 502,
            Self::MissingApiKey
            | Self::ConfigError(_)
            | Self::HttpError(_)
            | Self::ParseError(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Message safe to show to callers. Internal failures collapse to a
    /// generic message so upstream bodies and config values never leak.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::MissingName
            | Self::MethodNotAllowed
            | Self::MissingApiKey
            | Self::UpstreamFailed { .. } => self.to_string(),
            Self::InvalidBody(_) => "Invalid request body".to_string(),
            Self::ConfigError(_) | Self::HttpError(_) | Self::ParseError(_) | Self::Internal(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

impl From<reqwest::Error> for SummaryError {
    fn from(error: reqwest::Error) -> Self {
        SummaryError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for SummaryError {
    fn from(error: serde_json::Error) -> Self {
        SummaryError::ParseError(error.to_string())
    }
}
