//! Per-domain analysis report.

use serde::Serialize;

use crate::archive::RawCaptureSet;
use crate::metrics::{Category, LongevityMetrics, Quality};

/// Outcome of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    Completed,
    Error,
}

/// Everything known about one domain after analysis.
///
/// Metric fields are flattened into the serialized object and are left out
/// together when no capture timestamp could be resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub domain: String,
    pub has_snapshot: bool,
    pub availability_ts: Option<String>,
    pub timemap_count: usize,
    pub total_snapshots: usize,
    #[serde(flatten)]
    pub metrics: Option<LongevityMetrics>,
    pub quality_score: u8,
    pub category: Category,
    pub is_good: bool,
    pub recommended: bool,
    pub analysis_time_sec: f64,
    pub status: ExecutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    /// Report for a pipeline that ran to the end.
    pub fn completed(
        raw: RawCaptureSet,
        metrics: Option<LongevityMetrics>,
        quality: Quality,
        elapsed_secs: f64,
    ) -> Self {
        Self {
            total_snapshots: raw.total_snapshots(),
            domain: raw.domain,
            has_snapshot: raw.availability.has_snapshot,
            availability_ts: raw.availability.availability_ts,
            timemap_count: raw.timemap_count,
            metrics,
            quality_score: quality.score,
            category: quality.category,
            is_good: quality.is_good(),
            recommended: quality.recommended(),
            analysis_time_sec: round_secs(elapsed_secs),
            status: ExecutionStatus::Completed,
            error: None,
        }
    }

    /// Report for a domain whose analysis failed; all data fields are zeroed.
    pub fn failed(domain: impl Into<String>, error: impl ToString, elapsed_secs: f64) -> Self {
        Self {
            domain: domain.into(),
            has_snapshot: false,
            availability_ts: None,
            timemap_count: 0,
            total_snapshots: 0,
            metrics: None,
            quality_score: 0,
            category: Category::Error,
            is_good: false,
            recommended: false,
            analysis_time_sec: round_secs(elapsed_secs),
            status: ExecutionStatus::Error,
            error: Some(error.to_string()),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ExecutionStatus::Completed
    }
}

fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}
