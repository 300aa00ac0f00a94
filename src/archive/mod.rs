//! Archive data collection.
//!
//! This module gathers everything the Wayback Machine knows about one domain:
//! - the availability API's closest-snapshot signal
//! - every capture index record, page by page up to the offset ceiling
//! - the number of mementos listed in the timemap
//!
//! The three requests run one after another over a single HTTP session that
//! lives for one `collect` call. A failed sub-fetch contributes its "no data"
//! value and never aborts the others. A request that cannot even be built
//! aborts the whole collection.

mod availability;
mod cdx;
mod timemap;
mod types;

use std::sync::Arc;

use log::{debug, info, warn};

use crate::config::Config;
use crate::domain::normalize_domain;
use crate::error_handling::{AnalysisError, InfoType, ProcessingStats};
use crate::fetch::{Expect, Fetcher};
use crate::initialization::init_client;

use availability::parse_availability;
use cdx::{cdx_query, CdxPage, PageCursor, Step};
use timemap::{count_links, timemap_url};

pub use types::{AvailabilitySignal, CaptureRecord, RawCaptureSet};

/// Collects raw archive data for domains.
#[derive(Debug, Clone)]
pub struct ArchiveCollector {
    config: Arc<Config>,
    stats: Arc<ProcessingStats>,
}

impl ArchiveCollector {
    pub fn new(config: Arc<Config>, stats: Arc<ProcessingStats>) -> Self {
        Self { config, stats }
    }

    /// Gathers availability, capture records and timemap count for `domain`.
    ///
    /// The domain is normalized before any request. Archive failures degrade to
    /// empty data.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Session` if the HTTP session cannot be built and
    /// `AnalysisError::MalformedRequest` if an endpoint does not form a valid
    /// request.
    pub async fn collect(&self, domain: &str) -> Result<RawCaptureSet, AnalysisError> {
        let domain = normalize_domain(domain);
        let client = init_client(&self.config)?;
        let fetcher = Fetcher::new(
            client,
            self.config.retry_policy(),
            Arc::clone(&self.stats),
        );

        let availability = self.fetch_availability(&fetcher, &domain).await?;
        let records = self.fetch_captures(&fetcher, &domain).await?;
        let timemap_count = self.fetch_timemap_count(&fetcher, &domain).await?;

        debug!(
            "{domain}: has_snapshot={}, {} capture records, {timemap_count} timemap links",
            availability.has_snapshot,
            records.len()
        );

        Ok(RawCaptureSet {
            domain,
            availability,
            records,
            timemap_count,
        })
    }

    // Content-Type decides JSON here, so an HTML error page is not retried
    async fn fetch_availability(
        &self,
        fetcher: &Fetcher,
        domain: &str,
    ) -> Result<AvailabilitySignal, AnalysisError> {
        let body = fetcher
            .get(
                &self.config.availability_endpoint,
                &[("url", domain.to_string())],
                Expect::Auto,
            )
            .await?;
        if body.is_none() {
            warn!("No availability data for {domain}");
        }
        Ok(parse_availability(body.as_ref().and_then(|b| b.as_json())))
    }

    async fn fetch_captures(
        &self,
        fetcher: &Fetcher,
        domain: &str,
    ) -> Result<Vec<CaptureRecord>, AnalysisError> {
        let mut records = Vec::new();
        let mut cursor = PageCursor::new(self.config.page_size, self.config.max_offset);

        loop {
            let body = fetcher
                .get(
                    &self.config.cdx_endpoint,
                    &cdx_query(domain, &cursor),
                    Expect::Json,
                )
                .await?;
            let page = CdxPage::from_body(body);

            match page {
                CdxPage::Empty => break,
                CdxPage::Malformed => {
                    warn!(
                        "Unexpected capture index page for {domain} at offset {}",
                        cursor.offset()
                    );
                    self.stats.increment_info(InfoType::MalformedCdxPage);
                    break;
                }
                page => {
                    let rows = page.row_count();
                    records.extend(page.into_records());
                    match cursor.advance(rows) {
                        Step::Next(_) => continue,
                        Step::Exhausted => break,
                        Step::CeilingReached => {
                            info!(
                                "Stopped paging {domain} at the offset ceiling ({} records)",
                                records.len()
                            );
                            self.stats.increment_info(InfoType::PaginationCeilingReached);
                            break;
                        }
                    }
                }
            }
        }

        Ok(records)
    }

    async fn fetch_timemap_count(
        &self,
        fetcher: &Fetcher,
        domain: &str,
    ) -> Result<usize, AnalysisError> {
        let body = fetcher
            .get(
                &timemap_url(&self.config.timemap_endpoint, domain),
                &[],
                Expect::Auto,
            )
            .await?;
        Ok(count_links(body.as_ref()))
    }
}
