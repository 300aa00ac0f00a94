//! Error type definitions.
//!
//! This module defines the typed errors of the library and the failure/info
//! categories counted while talking to the archive.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// An archive endpoint is not a valid absolute URL.
    #[error("Invalid {name} endpoint '{url}': {source}")]
    InvalidEndpoint {
        name: &'static str,
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A numeric or scheme setting is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidSetting(String),
}

/// Faults that abort a single domain analysis.
///
/// These never escape the analyzer: they are turned into an error-status report.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The per-domain HTTP session could not be created.
    #[error("Failed to open archive session: {0}")]
    Session(#[from] InitializationError),

    /// An archive request could not be built, e.g. an endpoint that is not a URL.
    #[error("Malformed archive request for {url}: {reason}")]
    MalformedRequest { url: String, reason: String },

    /// The whole pipeline exceeded the configured per-domain deadline.
    #[error("Analysis of {domain} timed out after {seconds}s")]
    DomainTimeout { domain: String, seconds: u64 },

    /// The task running the pipeline panicked or was cancelled.
    #[error("Analysis task for {domain} failed: {reason}")]
    TaskFailed { domain: String, reason: String },
}

/// Failure kinds of a single archive request attempt.
///
/// Every failed attempt is categorized into exactly one of these; the kind
/// selects the backoff applied before the next attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    HttpRequestTooManyRequests,  // 429
    HttpRequestServerError,      // 5xx
    HttpRequestClientError,      // 4xx other than 429
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestOtherError,       // Any other transport-level fault
    JsonDecodeError,
}

/// Informational events worth counting during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    EmptyJsonBody,
    MalformedCdxPage,
    PaginationCeilingReached,
    LongLiveOverride,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestTooManyRequests => "Too many requests (429)",
            ErrorType::HttpRequestServerError => "HTTP server error (5xx)",
            ErrorType::HttpRequestClientError => "HTTP client error (4xx)",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::JsonDecodeError => "JSON decode error",
        }
    }

    /// Whether the archive asked us to slow down.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ErrorType::HttpRequestTooManyRequests)
    }
}

impl InfoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::EmptyJsonBody => "Empty JSON response",
            InfoType::MalformedCdxPage => "Malformed CDX page",
            InfoType::PaginationCeilingReached => "CDX offset ceiling reached",
            InfoType::LongLiveOverride => "Long-live override applied",
        }
    }
}
