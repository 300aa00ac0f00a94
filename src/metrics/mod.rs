//! Longevity metrics and quality classification.
//!
//! Pure transformations of a [`RawCaptureSet`]: no I/O happens here.

mod score;

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDateTime};
use serde::Serialize;

use crate::archive::RawCaptureSet;
use crate::config::{ARCHIVE_TIMESTAMP_FORMAT, ARCHIVE_TIMESTAMP_LEN};

pub use score::{classify, heuristic_score, Category, Quality};

/// Time-series statistics over a domain's resolvable captures.
///
/// Only produced when at least one capture timestamp resolves to a date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongevityMetrics {
    pub first_snapshot: NaiveDateTime,
    pub last_snapshot: NaiveDateTime,
    /// Mean whole-day gap between consecutive captures, rounded to 2 decimals
    pub avg_interval_days: f64,
    pub max_gap_days: i64,
    pub years_covered: usize,
    pub snapshots_per_year: BTreeMap<i32, usize>,
    /// Distinct non-empty digests across all raw records
    pub unique_versions: usize,
}

/// Parses a full-precision archive timestamp (`YYYYMMDDHHMMSS`).
///
/// Shorter, longer, or non-calendar values yield `None`.
pub fn parse_archive_timestamp(ts: &str) -> Option<NaiveDateTime> {
    if ts.len() != ARCHIVE_TIMESTAMP_LEN {
        return None;
    }
    NaiveDateTime::parse_from_str(ts, ARCHIVE_TIMESTAMP_FORMAT).ok()
}

/// Derives longevity metrics from raw captures.
///
/// Returns `None` when no record carries a resolvable timestamp. Duplicate
/// records are counted as they come.
pub fn derive_metrics(raw: &RawCaptureSet) -> Option<LongevityMetrics> {
    let mut dates: Vec<NaiveDateTime> = raw
        .records
        .iter()
        .filter_map(|record| parse_archive_timestamp(&record.timestamp))
        .collect();
    if dates.is_empty() {
        return None;
    }
    dates.sort_unstable();

    let gaps: Vec<i64> = dates
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).num_days())
        .collect();
    let avg_interval_days = if gaps.is_empty() {
        0.0
    } else {
        round2(gaps.iter().sum::<i64>() as f64 / gaps.len() as f64)
    };
    let max_gap_days = gaps.iter().copied().max().unwrap_or(0);

    let mut snapshots_per_year = BTreeMap::new();
    for date in &dates {
        *snapshots_per_year.entry(date.year()).or_insert(0) += 1;
    }

    let unique_versions = raw
        .records
        .iter()
        .map(|record| record.digest.as_str())
        .filter(|digest| !digest.is_empty())
        .collect::<HashSet<_>>()
        .len();

    Some(LongevityMetrics {
        first_snapshot: dates[0],
        last_snapshot: dates[dates.len() - 1],
        avg_interval_days,
        max_gap_days,
        years_covered: snapshots_per_year.len(),
        snapshots_per_year,
        unique_versions,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::CaptureRecord;

    fn record(ts: &str, digest: &str) -> CaptureRecord {
        CaptureRecord {
            timestamp: ts.to_string(),
            original_url: "http://example.com/".to_string(),
            digest: digest.to_string(),
        }
    }

    fn raw(records: Vec<CaptureRecord>) -> RawCaptureSet {
        RawCaptureSet {
            domain: "example.com".to_string(),
            records,
            ..RawCaptureSet::default()
        }
    }

    #[test]
    fn test_parse_archive_timestamp() {
        let parsed = parse_archive_timestamp("20200229123000").expect("leap day");
        assert_eq!(parsed.year(), 2020);
        assert!(parse_archive_timestamp("202002").is_none());
        assert!(parse_archive_timestamp("20210229123000").is_none());
        assert!(parse_archive_timestamp("2020022912300000").is_none());
        assert!(parse_archive_timestamp("abcdefghijklmn").is_none());
    }

    #[test]
    fn test_no_resolvable_dates() {
        assert!(derive_metrics(&raw(vec![])).is_none());
        assert!(derive_metrics(&raw(vec![record("2010", "A"), record("bogus", "B")])).is_none());
    }

    #[test]
    fn test_single_date() {
        let metrics = derive_metrics(&raw(vec![record("20150601000000", "A")])).expect("metrics");
        assert_eq!(metrics.first_snapshot, metrics.last_snapshot);
        assert_eq!(metrics.avg_interval_days, 0.0);
        assert_eq!(metrics.max_gap_days, 0);
        assert_eq!(metrics.years_covered, 1);
        assert_eq!(metrics.unique_versions, 1);
    }

    #[test]
    fn test_gaps_use_sorted_order() {
        let metrics = derive_metrics(&raw(vec![
            record("20100111000000", "A"),
            record("20100101000000", "A"),
            record("20100104000000", "B"),
        ]))
        .expect("metrics");

        assert_eq!(metrics.first_snapshot.format("%Y-%m-%d").to_string(), "2010-01-01");
        assert_eq!(metrics.last_snapshot.format("%Y-%m-%d").to_string(), "2010-01-11");
        // gaps 3 and 7
        assert_eq!(metrics.avg_interval_days, 5.0);
        assert_eq!(metrics.max_gap_days, 7);
        assert_eq!(metrics.unique_versions, 2);
    }

    #[test]
    fn test_partial_days_are_truncated_and_mean_rounded() {
        let metrics = derive_metrics(&raw(vec![
            record("20100101000000", "A"),
            record("20100102120000", "A"),
            record("20100103000000", "A"),
            record("20100104000000", "A"),
        ]))
        .expect("metrics");
        // whole-day gaps 1, 0, 1
        assert_eq!(metrics.avg_interval_days, 0.67);
        assert_eq!(metrics.max_gap_days, 1);
    }

    #[test]
    fn test_year_table_matches_resolvable_records() {
        let metrics = derive_metrics(&raw(vec![
            record("20090101000000", "A"),
            record("20090601000000", "A"),
            record("20120101000000", "B"),
            record("2012", "C"),
            record("20150101000000", ""),
        ]))
        .expect("metrics");

        assert_eq!(metrics.years_covered, metrics.snapshots_per_year.len());
        assert_eq!(metrics.snapshots_per_year.values().sum::<usize>(), 4);
        assert_eq!(metrics.snapshots_per_year.get(&2009), Some(&2));
        // digest of the unresolvable record still counts, blank one does not
        assert_eq!(metrics.unique_versions, 3);
    }

    #[test]
    fn test_duplicates_are_tolerated() {
        let metrics = derive_metrics(&raw(vec![
            record("20100101000000", "A"),
            record("20100101000000", "A"),
        ]))
        .expect("metrics");
        assert_eq!(metrics.max_gap_days, 0);
        assert_eq!(metrics.snapshots_per_year.get(&2010), Some(&2));
        assert_eq!(metrics.unique_versions, 1);
    }
}
