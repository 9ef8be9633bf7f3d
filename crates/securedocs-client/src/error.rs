//! Mapping of HTTP failures into [`AppError`].

use reqwest::StatusCode;
use serde::Deserialize;

use securedocs_core::error::{AppError, ErrorKind};

/// Error body the API server sends with failure statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// The error kind for a non-success status.
pub fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status.as_u16() {
        400 | 422 => ErrorKind::Validation,
        401 => ErrorKind::Unauthenticated,
        403 => ErrorKind::Forbidden,
        404 => ErrorKind::NotFound,
        409 => ErrorKind::Conflict,
        _ => ErrorKind::Server,
    }
}

/// Build the error for a failure response with the given body.
///
/// The server's own message is used when the body carries one.
pub fn status_error(status: StatusCode, body: &str) -> AppError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty());

    let message = match detail {
        Some(detail) => detail,
        None => match status.canonical_reason() {
            Some(reason) => format!("Request failed with status {} {reason}", status.as_u16()),
            None => format!("Request failed with status {}", status.as_u16()),
        },
    };

    AppError::new(kind_for_status(status), message)
}

/// Map a transport-level failure.
pub fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_decode() {
        AppError::with_source(ErrorKind::Serialization, format!("Invalid response body: {err}"), err)
    } else if err.is_builder() {
        AppError::with_source(ErrorKind::Internal, format!("Invalid request: {err}"), err)
    } else {
        AppError::with_source(ErrorKind::Network, format!("API server unreachable: {err}"), err)
    }
}
