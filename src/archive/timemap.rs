//! Timemap link counting.

use crate::config::TIMEMAP_LINK_MARKER;
use crate::fetch::Body;

/// Timemap URL for `domain` under `endpoint`.
pub(crate) fn timemap_url(endpoint: &str, domain: &str) -> String {
    format!("{}/{}", endpoint.trim_end_matches('/'), domain)
}

/// Counts link markers in a timemap response; anything but a text body counts 0.
pub(crate) fn count_links(body: Option<&Body>) -> usize {
    body.and_then(Body::as_text)
        .map(|text| text.matches(TIMEMAP_LINK_MARKER).count())
        .unwrap_or(0)
}
