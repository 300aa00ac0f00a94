//! Analysis pipeline.
//!
//! `Analyzer` wires the collector, the metric derivation and the classifier
//! together. A single analysis always yields a [`Report`]; faults become
//! error-status reports instead of propagating.

mod batch;

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};

use crate::archive::ArchiveCollector;
use crate::config::Config;
use crate::domain::{normalize_domain, LongLiveDomains};
use crate::error_handling::{AnalysisError, InfoType, ProcessingStats};
use crate::metrics::{classify, derive_metrics};
use crate::report::Report;

pub use batch::BatchMode;

/// Runs the domain longevity pipeline.
///
/// Cheap to clone: configuration, allow-list and statistics are shared.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: Arc<Config>,
    long_live: Arc<LongLiveDomains>,
    stats: Arc<ProcessingStats>,
    collector: ArchiveCollector,
}

impl Analyzer {
    pub fn new(config: Config, long_live: Arc<LongLiveDomains>) -> Self {
        Self::with_stats(config, long_live, Arc::new(ProcessingStats::new()))
    }

    /// Builds an analyzer that records fetch statistics into `stats`.
    pub fn with_stats(
        config: Config,
        long_live: Arc<LongLiveDomains>,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        let config = Arc::new(config);
        let collector = ArchiveCollector::new(Arc::clone(&config), Arc::clone(&stats));
        Self {
            config,
            long_live,
            stats,
            collector,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Analyzes one domain.
    ///
    /// Archive outages produce a `completed` report with no data. A faulty
    /// setup (no HTTP session, an endpoint that is not a URL) or an expired
    /// per-domain deadline produces an `error` report instead.
    pub async fn analyze_one(&self, domain: &str) -> Report {
        let domain = normalize_domain(domain);
        let start = Instant::now();

        let outcome = match self.config.domain_timeout() {
            Some(limit) => match tokio::time::timeout(limit, self.pipeline(&domain, start)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(AnalysisError::DomainTimeout {
                    domain: domain.clone(),
                    seconds: limit.as_secs(),
                }),
            },
            None => self.pipeline(&domain, start).await,
        };

        match outcome {
            Ok(report) => {
                info!(
                    "{domain}: {} ({}), {} snapshots",
                    report.category, report.quality_score, report.total_snapshots
                );
                report
            }
            Err(e) => {
                warn!("Analysis failed for {domain}: {e}");
                Report::failed(domain, e, start.elapsed().as_secs_f64())
            }
        }
    }

    async fn pipeline(&self, domain: &str, start: Instant) -> Result<Report, AnalysisError> {
        let raw = self.collector.collect(domain).await?;
        let metrics = derive_metrics(&raw);
        let quality = classify(
            &raw.domain,
            raw.total_snapshots(),
            metrics.as_ref(),
            &self.long_live,
        );
        if self.long_live.contains(&raw.domain) {
            debug!("{} is on the long-live list", raw.domain);
            self.stats.increment_info(InfoType::LongLiveOverride);
        }
        Ok(Report::completed(
            raw,
            metrics,
            quality,
            start.elapsed().as_secs_f64(),
        ))
    }
}
