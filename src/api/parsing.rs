use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::core::models::SummaryRequest;
use crate::errors::SummaryError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// HTTP method of an API Gateway proxy event (REST v1 or HTTP API v2).
pub fn request_method(payload: &Value) -> Option<&str> {
    v_str(payload, &["httpMethod"]).or_else(|| v_str(payload, &["requestContext", "http", "method"]))
}

pub fn is_post(payload: &Value) -> bool {
    request_method(payload).is_some_and(|m| m.eq_ignore_ascii_case("POST"))
}

/// Raw request body. A missing or null body is treated as `{}`.
pub fn decode_body(payload: &Value) -> Result<String, SummaryError> {
    let Some(body) = v_str(payload, &["body"]) else {
        return Ok("{}".to_string());
    };

    let is_base64 = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !is_base64 {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| SummaryError::InvalidBody(format!("Failed to decode base64 body: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| SummaryError::InvalidBody(format!("Body is not valid UTF-8: {e}")))
}

/// Parses the JSON request body. A blank body is an empty request, which
/// later fails validation with "Missing name".
pub fn parse_summary_request(body: &str) -> Result<SummaryRequest, SummaryError> {
    if body.trim().is_empty() {
        return Ok(SummaryRequest::default());
    }
    serde_json::from_str(body).map_err(|e| SummaryError::InvalidBody(e.to_string()))
}
