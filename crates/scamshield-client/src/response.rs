//! Shared handling of API responses

use crate::error::HttpStatusError;
use crate::transport::ApiResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extract a human-readable error from a failed response body
///
/// Prefers a top-level `error` string. The backend also wraps errors as
/// `{"detail": {"error": code, "message": text}}`, so `detail.message`,
/// `detail.error` and a plain string `detail` are tried next. Bodies that are
/// not JSON yield `None`.
#[must_use]
pub fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let non_empty = |v: Option<&Value>| {
        v.and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    };

    non_empty(value.get("error")).or_else(|| {
        let detail = value.get("detail")?;
        non_empty(detail.get("message"))
            .or_else(|| non_empty(detail.get("error")))
            .or_else(|| non_empty(Some(detail)))
    })
}

/// Describe a non-success response
#[must_use]
pub fn status_error(response: &ApiResponse) -> HttpStatusError {
    HttpStatusError {
        status: response.status,
        detail: error_detail(&response.body),
    }
}

/// Decode a successful response body
///
/// # Errors
///
/// Returns the JSON error when the body does not match `T`.
pub fn decode<T: DeserializeOwned>(response: &ApiResponse) -> serde_json::Result<T> {
    serde_json::from_str(&response.body)
}
