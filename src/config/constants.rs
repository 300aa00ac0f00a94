//! Configuration constants.
//!
//! This module defines the defaults used throughout the application: archive
//! endpoints, request timeouts, retry budget, and capture index pagination limits.

// Archive endpoints
/// Wayback availability API (closest live snapshot lookup).
pub const AVAILABILITY_ENDPOINT: &str = "https://archive.org/wayback/available";
/// Wayback CDX capture index API.
pub const CDX_ENDPOINT: &str = "https://web.archive.org/cdx/search/cdx";
/// Wayback timemap base URL; the domain is appended as the last path segment.
pub const TIMEMAP_ENDPOINT: &str = "http://web.archive.org/web/timemap/link";

// Network operation timeouts
/// Per-request timeout in seconds
/// Applies to every single archive request, not to a whole domain analysis.
/// A slow pagination loop can therefore take pages × timeout in the worst case.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
/// TCP connection timeout in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for archive requests.
///
/// The archive asks API clients to identify themselves, so the default names the
/// tool and its version rather than impersonating a browser.
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("domain_longevity/", env!("CARGO_PKG_VERSION"));

// Retry strategy
/// Maximum number of attempts per request (including the initial attempt)
pub const RETRY_MAX_ATTEMPTS: u32 = 3;
/// Base delay in milliseconds; the backoff before retry `n` is `n × base`
pub const RETRY_BASE_DELAY_MS: u64 = 2000;
/// Extra multiplier applied to the linear backoff after a 429 response
pub const RATE_LIMIT_BACKOFF_FACTOR: u32 = 2;

// Capture index pagination
/// Rows requested per CDX page
pub const CDX_PAGE_SIZE: usize = 1000;
/// Highest CDX offset ever requested.
/// Keeps analysis time bounded for domains with an anomalous number of captures:
/// at most `CDX_MAX_OFFSET / CDX_PAGE_SIZE + 1` pages are fetched per domain.
pub const CDX_MAX_OFFSET: usize = 50_000;
/// Field list requested from the CDX API, in column order
pub const CDX_FIELDS: &str = "timestamp,original,digest";

// Archive data formats
/// Substring counted in the timemap body to approximate snapshot density
pub const TIMEMAP_LINK_MARKER: &str = "web/";
/// Length of a fully resolved archive timestamp (`YYYYMMDDHHMMSS`)
pub const ARCHIVE_TIMESTAMP_LEN: usize = 14;
/// chrono format of a fully resolved archive timestamp
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

// Long-live allow-list
/// File name searched for in the working directory and next to the executable
pub const LONG_LIVE_FILE_NAME: &str = "long_live_domains.txt";

// Batch execution
/// Default number of domains analyzed at once (1 = sequential)
pub const DEFAULT_MAX_CONCURRENCY: usize = 1;

// HTTP status codes (for clarity and consistency)
pub const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;
