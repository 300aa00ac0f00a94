//! Resilient HTTP fetching.
//!
//! This module provides:
//! - `Fetcher`: one HTTP request with bounded retry and content-type-aware decoding
//! - `RetryPolicy`: the reusable backoff policy the fetcher is built on
//! - `Body`/`Expect`: decoded response bodies and the caller's decoding hint
//!
//! The fetcher has no knowledge of archives or domains. Network and decode
//! failures never escape it: an exhausted retry budget yields `Ok(None)`, which
//! callers must treat as "no data". Only a request that cannot be built at all
//! is reported as an error.

mod body;
mod retry;

use std::sync::Arc;

use log::{debug, error};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Request};

use crate::error_handling::{
    categorize_reqwest_error, categorize_status, AnalysisError, ErrorType, InfoType,
    ProcessingStats,
};

use body::{decode_body, is_json_content_type, Decoded};

pub use body::{Body, Expect};
pub use retry::{Attempt, RetryPolicy};

/// Executes archive requests with retry and decoding.
///
/// Owns the HTTP session (`reqwest::Client`) it was built with; dropping the
/// fetcher releases the session.
pub struct Fetcher {
    client: reqwest::Client,
    policy: RetryPolicy,
    stats: Arc<ProcessingStats>,
}

impl Fetcher {
    pub fn new(client: reqwest::Client, policy: RetryPolicy, stats: Arc<ProcessingStats>) -> Self {
        Self {
            client,
            policy,
            stats,
        }
    }

    /// Issues `method url?query` and decodes the response.
    ///
    /// Returns `Some(Body::Json)` when JSON was expected or declared and parsed,
    /// `Some(Body::Text)` for other successful responses, and `None` when the
    /// retry budget ran out or the JSON body was blank.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::MalformedRequest` when the request cannot be
    /// built, e.g. for an endpoint that is not a URL. Nothing is sent.
    pub async fn fetch(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        expect: Expect,
    ) -> Result<Option<Body>, AnalysisError> {
        let request = self
            .client
            .request(method, url)
            .query(query)
            .build()
            .map_err(|e| {
                error!("Malformed request for {url}: {e}");
                AnalysisError::MalformedRequest {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            })?;

        let target = request.url().to_string();
        let request = &request;
        Ok(self
            .policy
            .run(&target, move |_| self.execute_once(request, expect))
            .await)
    }

    /// Convenience wrapper for `GET`.
    pub async fn get(
        &self,
        url: &str,
        query: &[(&str, String)],
        expect: Expect,
    ) -> Result<Option<Body>, AnalysisError> {
        self.fetch(Method::GET, url, query, expect).await
    }

    async fn execute_once(&self, request: &Request, expect: Expect) -> Attempt<Body> {
        let url = request.url().clone();
        let Some(request) = request.try_clone() else {
            error!("Request for {url} cannot be replayed");
            return Attempt::Done(None);
        };

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                debug!("Transport error for {url}: {e}");
                return self.failed(categorize_reqwest_error(&e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return self.failed(categorize_status(status));
        }
        debug!("{status} from {url}");

        let declared_json = is_json_content_type(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                debug!("Failed to read body from {url}: {e}");
                return self.failed(categorize_reqwest_error(&e));
            }
        };

        match decode_body(text, expect == Expect::Json || declared_json) {
            Decoded::Body(body) => Attempt::Done(Some(body)),
            Decoded::Empty => {
                debug!("Empty JSON response from {url}");
                self.stats.increment_info(InfoType::EmptyJsonBody);
                Attempt::Done(None)
            }
            Decoded::Invalid(e) => {
                debug!("JSON decode error for {url}: {e}");
                self.failed(ErrorType::JsonDecodeError)
            }
        }
    }

    fn failed(&self, kind: ErrorType) -> Attempt<Body> {
        self.stats.increment_error(kind);
        Attempt::Failed(kind)
    }
}
