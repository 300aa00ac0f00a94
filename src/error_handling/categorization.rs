//! Error categorization.
//!
//! Maps HTTP statuses and `reqwest` errors onto `ErrorType` so that retry
//! backoff and statistics agree on what went wrong.

use reqwest::StatusCode;

use super::types::ErrorType;

/// Categorizes a non-success HTTP status.
pub fn categorize_status(status: StatusCode) -> ErrorType {
    if status.as_u16() == crate::config::HTTP_STATUS_TOO_MANY_REQUESTS {
        ErrorType::HttpRequestTooManyRequests
    } else if status.is_server_error() {
        ErrorType::HttpRequestServerError
    } else if status.is_client_error() {
        ErrorType::HttpRequestClientError
    } else {
        // 1xx/3xx that reqwest did not resolve (e.g. redirect limit hit)
        ErrorType::HttpRequestOtherError
    }
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Status-carrying errors use the same mapping as `categorize_status`; the rest
/// are split into timeouts, connection failures and other transport faults.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        return categorize_status(status);
    }

    if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else {
        ErrorType::HttpRequestOtherError
    }
}
