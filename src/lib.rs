//! domain_longevity library: domain quality scoring from web-archive history
//!
//! For each domain the analyzer queries three Wayback Machine APIs
//! (availability, CDX capture index, timemap), derives longevity metrics from
//! the capture time series, and classifies the domain into a quality tier.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use domain_longevity::{Analyzer, BatchMode, Config, LongLiveDomains};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let long_live = Arc::new(LongLiveDomains::load(None));
//! let analyzer = Analyzer::new(Config::default(), long_live);
//!
//! let report = analyzer.analyze_one("example.com").await;
//! println!("{}: {} ({})", report.domain, report.category, report.quality_score);
//!
//! let reports = analyzer
//!     .analyze_many(["a.com", "b.org"], BatchMode::Concurrent { max_in_flight: 4 })
//!     .await;
//! assert_eq!(reports.len(), 2);
//! # }
//! ```
//!
//! # Requirements
//!
//! All analysis entry points are async and need a Tokio runtime.

pub mod app;
pub mod archive;
pub mod config;
pub mod domain;
pub mod error_handling;
pub mod export;
pub mod fetch;
pub mod initialization;
pub mod metrics;
pub mod report;
mod run;

pub use archive::{ArchiveCollector, RawCaptureSet};
pub use config::{Config, ExportFormat, LogFormat, LogLevel};
pub use domain::{normalize_domain, LongLiveDomains};
pub use error_handling::{AnalysisError, InitializationError, ProcessingStats};
pub use metrics::{Category, LongevityMetrics, Quality};
pub use report::{ExecutionStatus, Report};
pub use run::{Analyzer, BatchMode};
