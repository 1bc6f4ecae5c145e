//! API Lambda handler for the search-summary endpoint.
//!
//! This module handles:
//! - Method check (POST only)
//! - Body decoding and request parsing
//! - Delegation to the [`SearchSummaryHandler`] pipeline
//! - Conversion of every outcome, including panics, to a JSON proxy response

use futures::FutureExt;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{helpers, parsing};
use crate::core::config::AppConfig;
use crate::errors::{INTERNAL_ERROR_MESSAGE, SummaryError};
use crate::pipeline::SearchSummaryHandler;

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// # Errors
///
/// Never returns `Err`: configuration and pipeline failures are answered
/// with a JSON error response instead.
#[tracing::instrument(level = "info", skip(event), fields(request_id = %Uuid::new_v4()))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let config = match AppConfig::from_env().map_err(SummaryError::ConfigError) {
        Ok(config) => config,
        Err(e) => {
            error!("Config error: {}", e);
            return Ok(helpers::err_response(e.status_code(), &e.public_message()));
        }
    };

    let summary_handler = SearchSummaryHandler::from_config(&config);
    Ok(handle_event(&summary_handler, &event.payload).await)
}

/// Processes one proxy event. Panics inside the pipeline become a generic
/// 500 response.
pub async fn handle_event(summary_handler: &SearchSummaryHandler, payload: &Value) -> Value {
    match AssertUnwindSafe(process_event(summary_handler, payload))
        .catch_unwind()
        .await
    {
        Ok(response) => response,
        Err(_) => {
            error!("summarizeSearch panicked");
            helpers::err_response(500, INTERNAL_ERROR_MESSAGE)
        }
    }
}

async fn process_event(summary_handler: &SearchSummaryHandler, payload: &Value) -> Value {
    let method = parsing::request_method(payload).unwrap_or("");
    info!(method = %method, "Search summary request received");

    if !parsing::is_post(payload) {
        let err = SummaryError::MethodNotAllowed;
        return helpers::err_response(err.status_code(), &err.public_message());
    }

    let request = match parsing::decode_body(payload).and_then(|b| parsing::parse_summary_request(&b)) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Rejecting malformed request body");
            return helpers::err_response(e.status_code(), &e.public_message());
        }
    };

    match summary_handler.handle(&request).await {
        Ok(result) => helpers::ok_summary(&result),
        Err(failure) => {
            if failure.error.status_code() >= 500 {
                error!(error = %failure.error, "summarizeSearch error");
            } else {
                info!(error = %failure.error, "Request rejected");
            }
            helpers::failure_response(&failure)
        }
    }
}
