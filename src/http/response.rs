//! Plain-text responses
//!
//! Bodies are human-readable and prefixed with `[flatkv]`. Errors never
//! carry on-disk paths, only the key and the underlying error text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::FlatError;
use crate::store::WriteReport;

/// Prefix of every response body produced by the handlers
pub const TAG: &str = "[flatkv]";

/// Build a `text/plain` response
pub(crate) fn text(status: StatusCode, message: impl AsRef<str>) -> Response {
    (status, format!("{} {}", TAG, message.as_ref())).into_response()
}

/// Answer a finished bulk or single write. Failures caused only by unsafe
/// keys are the client's fault (400), anything else is a 500.
pub(crate) fn write_report(report: &WriteReport) -> Response {
    let Some(err) = report.last_error() else {
        return text(StatusCode::OK, "File(s) successfully written.");
    };

    let status = if report.only_invalid_keys() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    text(
        status,
        format!(
            "Error {}: Couldn't write {} key(s) ({}).",
            status.as_u16(),
            report.failed_count(),
            cause(err)
        ),
    )
}

/// Client-facing cause of an error: the io error text for storage
/// failures, the full message otherwise.
pub(crate) fn cause(err: &FlatError) -> String {
    match err {
        FlatError::StorageUnavailable { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for FlatError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let message = match &self {
            FlatError::InvalidKey { key, reason } => {
                format!("Invalid key \"{}\": {}.", key, reason)
            }
            FlatError::NotFound { key } => format!("Key \"{}\" not found.", key),
            FlatError::EmptyInput => "No data provided or no data received.".to_string(),
            FlatError::MalformedPair { .. } => "Must post in format `key=value`.".to_string(),
            FlatError::StorageUnavailable { context, source } => {
                format!("Error 500: {} ({}).", context, source)
            }
            FlatError::Config(_) | FlatError::Io(_) => format!("Error 500: {}.", self),
        };

        text(status, message)
    }
}
