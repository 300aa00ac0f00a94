//! Domain name handling.
//!
//! Key items:
//! - `normalize_domain()` - the only normalization applied to input (trim + lowercase)
//! - `LongLiveDomains` - the read-only allow-list of known-good domains

mod long_live;

pub use long_live::LongLiveDomains;

/// Normalizes a domain name for lookup and archive queries.
///
/// Only surrounding whitespace is removed and ASCII/Unicode case is folded; no
/// scheme stripping, `www.` removal or validation happens here.
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().to_lowercase()
}
