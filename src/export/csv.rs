//! CSV export (flattened view).

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::report::Report;

/// One CSV row; metric columns are empty when metrics are absent.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    domain: &'a str,
    has_snapshot: bool,
    availability_ts: Option<&'a str>,
    timemap_count: usize,
    total_snapshots: usize,
    first_snapshot: Option<String>,
    last_snapshot: Option<String>,
    avg_interval_days: Option<f64>,
    max_gap_days: Option<i64>,
    years_covered: Option<usize>,
    /// Compact JSON object, e.g. `{"2019":3,"2020":1}`
    snapshots_per_year: Option<String>,
    unique_versions: Option<usize>,
    quality_score: u8,
    category: &'static str,
    is_good: bool,
    recommended: bool,
    analysis_time_sec: f64,
    status: &'static str,
    error: Option<&'a str>,
}

impl<'a> CsvRow<'a> {
    fn from_report(report: &'a Report) -> Result<Self> {
        let metrics = report.metrics.as_ref();
        let snapshots_per_year = metrics
            .map(|m| serde_json::to_string(&m.snapshots_per_year))
            .transpose()
            .context("Failed to encode snapshots_per_year")?;

        Ok(Self {
            domain: &report.domain,
            has_snapshot: report.has_snapshot,
            availability_ts: report.availability_ts.as_deref(),
            timemap_count: report.timemap_count,
            total_snapshots: report.total_snapshots,
            first_snapshot: metrics.map(|m| m.first_snapshot.format("%Y-%m-%dT%H:%M:%S").to_string()),
            last_snapshot: metrics.map(|m| m.last_snapshot.format("%Y-%m-%dT%H:%M:%S").to_string()),
            avg_interval_days: metrics.map(|m| m.avg_interval_days),
            max_gap_days: metrics.map(|m| m.max_gap_days),
            years_covered: metrics.map(|m| m.years_covered),
            snapshots_per_year,
            unique_versions: metrics.map(|m| m.unique_versions),
            quality_score: report.quality_score,
            category: report.category.into(),
            is_good: report.is_good,
            recommended: report.recommended,
            analysis_time_sec: report.analysis_time_sec,
            status: if report.is_completed() { "completed" } else { "error" },
            error: report.error.as_deref(),
        })
    }
}

/// Writes a header row plus one row per report.
pub fn write_csv<W: Write>(reports: &[Report], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for report in reports {
        csv_writer
            .serialize(CsvRow::from_report(report)?)
            .with_context(|| format!("Failed to write CSV row for {}", report.domain))?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(reports.len())
}
