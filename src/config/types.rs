//! Configuration types and CLI options.
//!
//! This module defines the library `Config`, the enums used for command-line
//! argument parsing, and the clap `Opt` struct the binary converts into a `Config`.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    AVAILABILITY_ENDPOINT, CDX_ENDPOINT, CDX_MAX_OFFSET, CDX_PAGE_SIZE, DEFAULT_MAX_CONCURRENCY,
    DEFAULT_USER_AGENT, REQUEST_TIMEOUT_SECS, RETRY_BASE_DELAY_MS, RETRY_MAX_ATTEMPTS,
    TIMEMAP_ENDPOINT,
};
use crate::error_handling::InitializationError;
use crate::fetch::RetryPolicy;
use crate::run::BatchMode;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Output format for analysis reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// One JSON object per line
    Jsonl,
    /// Flattened CSV with a header row
    Csv,
}

/// Library configuration (no CLI dependencies).
///
/// Every field has a default matching the public Wayback Machine deployment, so
/// tests and embedders usually override only the endpoints or the retry delay.
///
/// # Examples
///
/// ```no_run
/// use domain_longevity::Config;
///
/// let config = Config {
///     max_concurrency: 4,
///     retry_base_delay_ms: 500,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Availability API endpoint
    pub availability_endpoint: String,

    /// CDX capture index endpoint
    pub cdx_endpoint: String,

    /// Timemap base URL (domain is appended as a path segment)
    pub timemap_endpoint: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Attempts per request, including the first one
    pub retry_attempts: u32,

    /// Base retry delay in milliseconds
    pub retry_base_delay_ms: u64,

    /// CDX rows per page
    pub page_size: usize,

    /// Highest CDX offset that may be requested
    pub max_offset: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Explicit long-live allow-list file
    pub long_live_path: Option<PathBuf>,

    /// Domains analyzed at once by the batch entry point (1 = sequential)
    pub max_concurrency: usize,

    /// Optional deadline for one whole domain analysis, in seconds
    pub domain_timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            availability_endpoint: AVAILABILITY_ENDPOINT.to_string(),
            cdx_endpoint: CDX_ENDPOINT.to_string(),
            timemap_endpoint: TIMEMAP_ENDPOINT.to_string(),
            timeout_seconds: REQUEST_TIMEOUT_SECS,
            retry_attempts: RETRY_MAX_ATTEMPTS,
            retry_base_delay_ms: RETRY_BASE_DELAY_MS,
            page_size: CDX_PAGE_SIZE,
            max_offset: CDX_MAX_OFFSET,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            long_live_path: None,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            domain_timeout_seconds: None,
        }
    }
}

impl Config {
    /// Checks endpoint URLs and numeric limits.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidEndpoint` for an endpoint that is not an
    /// absolute http(s) URL, and `InitializationError::InvalidSetting` for a zero
    /// page size, retry budget, or concurrency.
    pub fn validate(&self) -> Result<(), InitializationError> {
        for (name, endpoint) in [
            ("availability", &self.availability_endpoint),
            ("cdx", &self.cdx_endpoint),
            ("timemap", &self.timemap_endpoint),
        ] {
            let parsed =
                url::Url::parse(endpoint).map_err(|source| InitializationError::InvalidEndpoint {
                    name,
                    url: endpoint.clone(),
                    source,
                })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(InitializationError::InvalidSetting(format!(
                    "{name} endpoint must use http or https: {endpoint}"
                )));
            }
        }

        if self.page_size == 0 {
            return Err(InitializationError::InvalidSetting(
                "page size must be at least 1".to_string(),
            ));
        }
        if self.retry_attempts == 0 {
            return Err(InitializationError::InvalidSetting(
                "retry attempts must be at least 1".to_string(),
            ));
        }
        if self.max_concurrency == 0 {
            return Err(InitializationError::InvalidSetting(
                "max concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Retry policy shared by every request of an analysis.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
        )
    }

    /// Scheduling used by the batch entry point.
    pub fn batch_mode(&self) -> BatchMode {
        if self.max_concurrency <= 1 {
            BatchMode::Sequential
        } else {
            BatchMode::Concurrent {
                max_in_flight: self.max_concurrency,
            }
        }
    }

    /// Per-domain deadline, if one is configured.
    pub fn domain_timeout(&self) -> Option<Duration> {
        self.domain_timeout_seconds.map(Duration::from_secs)
    }
}

/// Command-line options for the `domain_longevity` binary.
#[derive(Debug, Parser)]
#[command(
    name = "domain_longevity",
    version,
    about = "Scores domains by their Wayback Machine history"
)]
pub struct Opt {
    /// File to read domains from, one per line ('-' reads stdin)
    pub file: PathBuf,

    /// Write reports to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Report output format
    #[arg(long, value_enum, default_value_t = ExportFormat::Jsonl)]
    pub format: ExportFormat,

    /// Long-live allow-list file (one domain per line)
    #[arg(long = "long-live")]
    pub long_live: Option<PathBuf>,

    /// Domains analyzed at once (1 = sequential)
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Attempts per archive request
    #[arg(long, default_value_t = RETRY_MAX_ATTEMPTS)]
    pub retry_attempts: u32,

    /// Base retry delay in milliseconds
    #[arg(long, default_value_t = RETRY_BASE_DELAY_MS)]
    pub retry_delay_ms: u64,

    /// CDX rows per page
    #[arg(long, default_value_t = CDX_PAGE_SIZE)]
    pub page_size: usize,

    /// Highest CDX offset requested
    #[arg(long, default_value_t = CDX_MAX_OFFSET)]
    pub max_offset: usize,

    /// Deadline for one whole domain analysis, in seconds
    #[arg(long)]
    pub domain_timeout_seconds: Option<u64>,

    /// Availability API endpoint
    #[arg(long, default_value = AVAILABILITY_ENDPOINT)]
    pub availability_endpoint: String,

    /// CDX capture index endpoint
    #[arg(long, default_value = CDX_ENDPOINT)]
    pub cdx_endpoint: String,

    /// Timemap base URL
    #[arg(long, default_value = TIMEMAP_ENDPOINT)]
    pub timemap_endpoint: String,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        Self {
            availability_endpoint: opt.availability_endpoint.clone(),
            cdx_endpoint: opt.cdx_endpoint.clone(),
            timemap_endpoint: opt.timemap_endpoint.clone(),
            timeout_seconds: opt.timeout_seconds,
            retry_attempts: opt.retry_attempts,
            retry_base_delay_ms: opt.retry_delay_ms,
            page_size: opt.page_size,
            max_offset: opt.max_offset,
            user_agent: opt.user_agent.clone(),
            long_live_path: opt.long_live.clone(),
            max_concurrency: opt.max_concurrency,
            domain_timeout_seconds: opt.domain_timeout_seconds,
        }
    }
}
