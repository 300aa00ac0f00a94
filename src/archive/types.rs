//! Raw archive data types.

/// One archived snapshot entry from the capture index.
///
/// Fields are kept as the archive sent them; duplicates across pages are
/// possible and are not removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureRecord {
    /// `YYYYMMDDHHMMSS` when fully resolved, possibly shorter
    pub timestamp: String,
    pub original_url: String,
    /// Content hash; equal digests mean equal captured content
    pub digest: String,
}

/// Closest live snapshot reported by the availability API.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilitySignal {
    pub has_snapshot: bool,
    pub availability_ts: Option<String>,
}

/// Everything collected for one domain, before any derivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCaptureSet {
    /// Normalized domain the requests were issued for
    pub domain: String,
    pub availability: AvailabilitySignal,
    pub records: Vec<CaptureRecord>,
    /// Number of link markers in the timemap body (0 on failure)
    pub timemap_count: usize,
}

impl RawCaptureSet {
    /// Raw number of capture records, before any timestamp filtering.
    pub fn total_snapshots(&self) -> usize {
        self.records.len()
    }
}
