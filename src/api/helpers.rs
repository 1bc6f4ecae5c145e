//! Response builders for the API Lambda.

use serde_json::{Map, Value, json};

use crate::core::models::SummaryResult;
use crate::errors::SummaryError;
use crate::pipeline::SummaryFailure;

/// Wraps a JSON body in an API Gateway proxy response.
#[must_use]
pub fn json_response(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "Content-Type": "application/json" },
        "body": body.to_string()
    })
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "error": message }))
}

#[must_use]
pub fn ok_summary(result: &SummaryResult) -> Value {
    let body = serde_json::to_value(result).unwrap_or_else(|_| json!({}));
    json_response(200, &body)
}

/// Error response for a pipeline failure. Upstream failures carry their
/// statuses; diagnostics are attached only when the request asked for them.
#[must_use]
pub fn failure_response(failure: &SummaryFailure) -> Value {
    let error = &failure.error;
    let mut body = Map::new();
    body.insert("error".to_string(), Value::from(error.public_message()));

    if let SummaryError::UpstreamFailed {
        status,
        fallback_status,
    } = error
    {
        body.insert("status".to_string(), json!(status));
        if let Some(fallback_status) = fallback_status {
            body.insert("fallbackStatus".to_string(), json!(fallback_status));
        }
    }

    if let Some(diagnostics) = &failure.diagnostics
        && let Ok(v) = serde_json::to_value(diagnostics)
    {
        body.insert("diagnostics".to_string(), v);
    }

    json_response(error.status_code(), &Value::Object(body))
}
