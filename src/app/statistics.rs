//! End-of-run statistics.

use std::collections::BTreeMap;

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats};
use crate::metrics::Category;
use crate::report::Report;

/// Counts over a finished batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub completed: usize,
    pub errored: usize,
    pub by_category: BTreeMap<&'static str, usize>,
}

impl BatchSummary {
    pub fn from_reports(reports: &[Report]) -> Self {
        let mut summary = Self {
            total: reports.len(),
            ..Self::default()
        };
        for report in reports {
            if report.is_completed() {
                summary.completed += 1;
            } else {
                summary.errored += 1;
            }
            let name: &'static str = report.category.into();
            *summary.by_category.entry(name).or_insert(0) += 1;
        }
        summary
    }

    pub fn count(&self, category: Category) -> usize {
        let name: &'static str = category.into();
        self.by_category.get(name).copied().unwrap_or(0)
    }
}

/// Logs the one-line run summary.
pub fn print_batch_summary(summary: &BatchSummary, elapsed_seconds: f64) {
    let categories = Category::iter()
        .map(|c| format!("{c}: {}", summary.count(c)))
        .collect::<Vec<_>>()
        .join(", ");
    info!(
        "✅ Analyzed {} domain{} ({} completed, {} errored) in {:.1}s [{}]",
        summary.total,
        if summary.total == 1 { "" } else { "s" },
        summary.completed,
        summary.errored,
        elapsed_seconds,
        categories
    );
}

/// Logs non-zero fetch failure and info counters.
pub fn print_error_statistics(stats: &ProcessingStats) {
    let total_errors = stats.total_errors();
    if total_errors > 0 {
        info!("Error Counts ({total_errors} total):");
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                info!("   {}: {}", error_type.as_str(), count);
            }
        }
    }

    let total_info = stats.total_info();
    if total_info > 0 {
        info!("Info Counts ({total_info} total):");
        for info_type in InfoType::iter() {
            let count = stats.get_info_count(info_type);
            if count > 0 {
                info!("   {}: {}", info_type.as_str(), count);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::RawCaptureSet;
    use crate::metrics::Quality;

    fn completed(domain: &str, category: Category) -> Report {
        let raw = RawCaptureSet {
            domain: domain.to_string(),
            ..RawCaptureSet::default()
        };
        Report::completed(raw, None, Quality { score: 0, category }, 0.1)
    }

    #[test]
    fn test_batch_summary_counts() {
        let reports = vec![
            completed("a.com", Category::Recommended),
            completed("b.com", Category::LowQuality),
            completed("c.com", Category::LowQuality),
            Report::failed("d.com", "boom", 0.0),
        ];
        let summary = BatchSummary::from_reports(&reports);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.errored, 1);
        assert_eq!(summary.count(Category::LowQuality), 2);
        assert_eq!(summary.count(Category::Medium), 0);
        assert_eq!(summary.count(Category::Error), 1);
        print_batch_summary(&summary, 1.5);
    }

    #[test]
    fn test_print_error_statistics_does_not_panic() {
        let stats = ProcessingStats::new();
        print_error_statistics(&stats);
        stats.increment_error(ErrorType::HttpRequestTooManyRequests);
        stats.increment_info(InfoType::PaginationCeilingReached);
        print_error_statistics(&stats);
    }
}
