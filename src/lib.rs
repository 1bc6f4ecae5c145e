/// Pressence - search-summary Lambda behind the Pressence360 landing page.
///
/// Given a person's name, the API Lambda gathers up to six web search results
/// and asks a chat-completion model for two lines of PR copy about them.
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda (API Gateway proxy events) for serverless execution
/// - Google Custom Search, with a DuckDuckGo HTML scrape as fallback
/// - OpenRouter chat completions, with a fallback model for client errors
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use pressence::core::config::AppConfig;
/// use pressence::core::models::SummaryRequest;
/// use pressence::pipeline::SearchSummaryHandler;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     pressence::setup_logging();
///
///     let config = AppConfig::from_env()?;
///     let handler = SearchSummaryHandler::from_config(&config);
///
///     let request = SummaryRequest {
///         name: Some("Jane Doe".to_string()),
///         debug: true,
///         ..SummaryRequest::default()
///     };
///
///     match handler.handle(&request).await {
///         Ok(result) => println!("{} ({} results)", result.summary, result.result_count),
///         Err(failure) => eprintln!("Failed with {}", failure.error.status_code()),
///     }
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod api;
pub mod core;
pub mod errors;
pub mod pipeline;
pub mod search;

pub use errors::SummaryError;
pub use pipeline::SearchSummaryHandler;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration, filtered by `RUST_LOG` (default `info`).
/// Calling it more than once is harmless.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// pressence::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
