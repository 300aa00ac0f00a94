//! Batch execution over many domains.
//!
//! Every domain runs behind an unwind boundary, so a panicking analysis turns
//! into an error report in either mode. Concurrent analyses live in a
//! `JoinSet`: dropping the batch future aborts whatever is still in flight.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use log::{info, warn};
use tokio::task::JoinSet;

use crate::domain::normalize_domain;
use crate::error_handling::AnalysisError;
use crate::initialization::init_semaphore;
use crate::report::Report;

use super::Analyzer;

/// How a batch of domains is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// One domain after another
    Sequential,
    /// Up to `max_in_flight` domains at once, each on its own task
    Concurrent { max_in_flight: usize },
}

impl Analyzer {
    /// Analyzes every domain and returns one report per input, in input order.
    ///
    /// A failing or panicking analysis only affects its own report.
    pub async fn analyze_many<I, S>(&self, domains: I, mode: BatchMode) -> Vec<Report>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains: Vec<String> = domains
            .into_iter()
            .map(|d| d.as_ref().to_string())
            .collect();
        info!("Analyzing {} domains ({mode:?})", domains.len());

        let analyzer = self.clone();
        run_batch(domains, mode, move |domain: String| {
            let analyzer = analyzer.clone();
            async move { analyzer.analyze_one(&domain).await }
        })
        .await
    }
}

/// Schedules `analyze` over `domains` according to `mode`.
async fn run_batch<F, Fut>(domains: Vec<String>, mode: BatchMode, analyze: F) -> Vec<Report>
where
    F: Fn(String) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = Report> + Send + 'static,
{
    match mode {
        BatchMode::Sequential => {
            let mut reports = Vec::with_capacity(domains.len());
            for domain in domains {
                reports.push(isolated(domain.clone(), analyze(domain)).await);
            }
            reports
        }
        BatchMode::Concurrent { max_in_flight } => {
            run_concurrent(domains, max_in_flight, analyze).await
        }
    }
}

async fn run_concurrent<F, Fut>(
    domains: Vec<String>,
    max_in_flight: usize,
    analyze: F,
) -> Vec<Report>
where
    F: Fn(String) -> Fut + Clone + Send + 'static,
    Fut: Future<Output = Report> + Send + 'static,
{
    let started = Instant::now();
    let semaphore = init_semaphore(max_in_flight);
    let mut tasks = JoinSet::new();

    for (index, domain) in domains.iter().enumerate() {
        let analyze = analyze.clone();
        let semaphore = Arc::clone(&semaphore);
        let domain = domain.clone();
        tasks.spawn(async move {
            // The semaphore is never closed
            let _permit = semaphore.acquire_owned().await.ok();
            let report = isolated(domain.clone(), analyze(domain)).await;
            (index, report)
        });
    }

    let mut slots: Vec<Option<Report>> = domains.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, report)) => slots[index] = Some(report),
            Err(e) => warn!("Analysis task ended abnormally: {e}"),
        }
    }

    // Slots left empty belong to tasks that never delivered
    slots
        .into_iter()
        .zip(domains)
        .map(|(slot, domain)| {
            slot.unwrap_or_else(|| {
                task_failed(&domain, "task was cancelled".to_string(), started)
            })
        })
        .collect()
}

/// Awaits one analysis, turning a panic into an error report for `domain`.
async fn isolated<Fut>(domain: String, analysis: Fut) -> Report
where
    Fut: Future<Output = Report>,
{
    let started = Instant::now();
    match AssertUnwindSafe(analysis).catch_unwind().await {
        Ok(report) => report,
        Err(payload) => task_failed(&domain, panic_message(payload.as_ref()), started),
    }
}

fn task_failed(domain: &str, reason: String, started: Instant) -> Report {
    let error = AnalysisError::TaskFailed {
        domain: domain.to_string(),
        reason,
    };
    warn!("{error}");
    Report::failed(
        normalize_domain(domain),
        error,
        started.elapsed().as_secs_f64(),
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::LongLiveDomains;
    use crate::report::ExecutionStatus;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn analyzer(server: &MockServer, allow: &[&str]) -> Analyzer {
        let config = Config {
            availability_endpoint: format!("{}/available", server.uri()),
            cdx_endpoint: format!("{}/cdx", server.uri()),
            timemap_endpoint: format!("{}/timemap", server.uri()),
            timeout_seconds: 2,
            retry_attempts: 1,
            retry_base_delay_ms: 1,
            ..Config::default()
        };
        Analyzer::new(config, Arc::new(LongLiveDomains::from_lines(allow.iter().copied())))
    }

    async fn mount_cdx(server: &MockServer, domain: &str, rows: usize, delay_ms: u64) {
        let mut body = vec![json!(["timestamp", "original", "digest"])];
        for year in 0..rows {
            body.push(json!([
                format!("{}0101000000", 2000 + year),
                format!("http://{domain}/"),
                format!("D{year}")
            ]));
        }
        Mock::given(method("GET"))
            .and(path("/cdx"))
            .and(query_param("url", domain))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body)
                    .set_delay(Duration::from_millis(delay_ms)),
            )
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_sequential_and_concurrent_preserve_order() {
        let server = MockServer::start().await;
        // The first domain answers last
        mount_cdx(&server, "a.example", 1, 300).await;
        mount_cdx(&server, "b.example", 2, 0).await;
        mount_cdx(&server, "c.example", 3, 100).await;
        let analyzer = analyzer(&server, &[]);
        let input = ["A.example", "b.example", "c.example"];

        for mode in [
            BatchMode::Sequential,
            BatchMode::Concurrent { max_in_flight: 3 },
        ] {
            let reports = analyzer.analyze_many(input, mode).await;
            let domains: Vec<&str> = reports.iter().map(|r| r.domain.as_str()).collect();
            assert_eq!(domains, ["a.example", "b.example", "c.example"], "{mode:?}");
            let totals: Vec<usize> = reports.iter().map(|r| r.total_snapshots).collect();
            assert_eq!(totals, [1, 2, 3], "{mode:?}");
        }
    }

    #[tokio::test]
    async fn test_deadline_only_fails_its_own_domain() {
        let server = MockServer::start().await;
        mount_cdx(&server, "slow.example", 1, 3_000).await;
        mount_cdx(&server, "fast.example", 1, 0).await;

        let config = Config {
            domain_timeout_seconds: Some(1),
            ..analyzer(&server, &[]).config().clone()
        };
        let analyzer = Analyzer::new(config, Arc::new(LongLiveDomains::empty()));

        let reports = analyzer
            .analyze_many(
                ["slow.example", "fast.example"],
                BatchMode::Concurrent { max_in_flight: 2 },
            )
            .await;

        assert_eq!(reports[0].status, ExecutionStatus::Error);
        assert!(reports[0]
            .error
            .as_deref()
            .is_some_and(|e| e.contains("timed out")));
        assert_eq!(reports[1].status, ExecutionStatus::Completed);
        assert_eq!(reports[1].total_snapshots, 1);
    }

    async fn stub_analysis(domain: String) -> Report {
        if domain.starts_with("boom") {
            panic!("fault injected for {domain}");
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        Report::failed(domain, "stub analysis", 0.0)
    }

    #[tokio::test]
    async fn test_panic_only_fails_its_own_domain() {
        for mode in [
            BatchMode::Sequential,
            BatchMode::Concurrent { max_in_flight: 2 },
        ] {
            let domains = vec![
                "first.example".to_string(),
                "Boom.example".to_string(),
                "last.example".to_string(),
            ];
            let reports = run_batch(domains, mode, stub_analysis).await;

            assert_eq!(reports.len(), 3, "{mode:?}");
            assert_eq!(reports[0].domain, "first.example");
            assert_eq!(reports[0].error.as_deref(), Some("stub analysis"));
            assert_eq!(reports[1].domain, "boom.example");
            assert_eq!(reports[1].status, ExecutionStatus::Error);
            assert!(reports[1]
                .error
                .as_deref()
                .is_some_and(|e| e.contains("fault injected for Boom.example")));
            assert_eq!(reports[2].domain, "last.example");
            assert_eq!(reports[2].error.as_deref(), Some("stub analysis"));
        }
    }

    #[tokio::test]
    async fn test_dropping_a_concurrent_batch_aborts_its_tasks() {
        let finished = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&finished);
        let slow = move |domain: String| {
            let counter = Arc::clone(&counter);
            async move {
                tokio::time::sleep(Duration::from_millis(300)).await;
                counter.fetch_add(1, Ordering::SeqCst);
                Report::failed(domain, "stub analysis", 0.0)
            }
        };

        let domains: Vec<String> = (0..4).map(|i| format!("d{i}.example")).collect();
        let batch = run_batch(domains, BatchMode::Concurrent { max_in_flight: 4 }, slow);
        assert!(tokio::time::timeout(Duration::from_millis(50), batch)
            .await
            .is_err());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let server = MockServer::start().await;
        let reports = analyzer(&server, &[])
            .analyze_many(Vec::<String>::new(), BatchMode::Concurrent { max_in_flight: 4 })
            .await;
        assert!(reports.is_empty());
    }
}
