//! Normalisation of raw responses into results or classified failures.
//!
//! Everything here is pure so the mapping rules can be tested without a
//! transport.

use serde_json::{Map, Value, json};

use super::error::ApiError;
use super::ports::TransportResponse;

/// Characters of a text error body appended to the failure message.
const ERROR_PREVIEW_CHARS: usize = 100;
/// Characters of an undecodable success body quoted in decode failures.
const DECODE_PREVIEW_CHARS: usize = 160;
const NO_CONTENT: u16 = 204;

/// Map a raw response to its JSON result or a classified failure.
///
/// - 204, `Content-Length: 0`, or an empty body resolve to `{}`.
/// - Other 2xx bodies must be JSON; anything else is [`ApiError::Decode`].
/// - Non-2xx responses become [`ApiError::Application`].
pub(crate) fn normalise_response(response: &TransportResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(application_failure(response));
    }
    if has_no_body(response) {
        return Ok(empty_result());
    }
    serde_json::from_slice(&response.body).map_err(|error| {
        ApiError::decode(format!(
            "expected JSON from status {} ({error}); received: {}",
            response.status,
            text_preview(&response.body, DECODE_PREVIEW_CHARS)
        ))
    })
}

/// The empty result object returned for bodiless success responses.
pub(crate) fn empty_result() -> Value {
    Value::Object(Map::new())
}

fn has_no_body(response: &TransportResponse) -> bool {
    response.status == NO_CONTENT || response.content_length == Some(0) || response.body.is_empty()
}

fn application_failure(response: &TransportResponse) -> ApiError {
    let status = response.status;
    let status_text = status_text(response);

    if is_json_content(response.content_type.as_deref()) {
        if let Ok(body) = serde_json::from_slice::<Value>(&response.body) {
            let message = json_error_message(&body).unwrap_or(status_text);
            return ApiError::Application {
                status,
                message,
                details: json_details(body, status),
            };
        }
    }

    let preview = text_preview(&response.body, ERROR_PREVIEW_CHARS);
    if preview.is_empty() {
        return ApiError::Application {
            status,
            message: status_text,
            details: json!({ "status": status }),
        };
    }
    ApiError::Application {
        status,
        message: format!("{status_text} - {preview}"),
        details: json!({ "status": status, "body": preview }),
    }
}

fn status_text(response: &TransportResponse) -> String {
    let text = response.status_text.trim();
    if text.is_empty() {
        format!("HTTP {}", response.status)
    } else {
        text.to_owned()
    }
}

fn is_json_content(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
}

/// First non-empty string among the `message` and `error` fields.
fn json_error_message(body: &Value) -> Option<String> {
    ["message", "error"].into_iter().find_map(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_owned)
    })
}

fn json_details(body: Value, status: u16) -> Value {
    match body {
        Value::Object(mut fields) => {
            fields.insert("status".to_owned(), Value::from(status));
            Value::Object(fields)
        }
        other => json!({ "status": status, "body": other }),
    }
}

fn text_preview(body: &[u8], limit: usize) -> String {
    String::from_utf8_lossy(body)
        .trim()
        .chars()
        .take(limit)
        .collect()
}
