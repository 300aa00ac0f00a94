//! Error handling and processing statistics.
//!
//! This module provides:
//! - Typed errors for initialization and per-domain analysis faults
//! - Failure categorization of archive requests
//! - Processing statistics tracking (failed attempts, info events)
//!
//! Request failures never surface as errors to callers of the analyzer; they are
//! counted here and degrade the affected report fields to "no data".

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, categorize_status};
pub use stats::ProcessingStats;
pub use types::{AnalysisError, ErrorType, InfoType, InitializationError};
