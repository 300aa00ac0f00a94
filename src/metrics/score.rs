//! Quality scoring.

use serde::Serialize;
use strum_macros::{Display, EnumIter, IntoStaticStr};

use crate::domain::LongLiveDomains;

use super::LongevityMetrics;

/// Quality tier assigned to a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, IntoStaticStr)]
pub enum Category {
    Recommended,
    Medium,
    #[serde(rename = "Low Quality")]
    #[strum(serialize = "Low Quality")]
    LowQuality,
    /// The analysis itself failed
    Error,
}

impl Category {
    /// Tier for a heuristic score.
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Category::Recommended,
            40..=79 => Category::Medium,
            _ => Category::LowQuality,
        }
    }

    pub fn is_good(self) -> bool {
        matches!(self, Category::Recommended | Category::Medium)
    }

    pub fn is_recommended(self) -> bool {
        self == Category::Recommended
    }
}

/// Score and tier for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality {
    pub score: u8,
    pub category: Category,
}

impl Quality {
    pub fn is_good(&self) -> bool {
        self.category.is_good()
    }

    pub fn recommended(&self) -> bool {
        self.category.is_recommended()
    }

    fn long_live() -> Self {
        Self {
            score: 100,
            category: Category::Recommended,
        }
    }

    fn no_signal() -> Self {
        Self {
            score: 0,
            category: Category::LowQuality,
        }
    }
}

/// Additive longevity score, clamped to `0..=100`.
///
/// A missing average interval never earns the regularity points.
pub fn heuristic_score(
    total_snapshots: usize,
    years_covered: usize,
    avg_interval_days: Option<f64>,
) -> u8 {
    let mut score: u32 = 0;

    score += match total_snapshots {
        100.. => 60,
        20..=99 => 30,
        _ => 0,
    };
    score += match years_covered {
        5.. => 30,
        2..=4 => 15,
        _ => 0,
    };
    if avg_interval_days.is_some_and(|avg| avg <= 365.0) {
        score += 10;
    }

    score.min(100) as u8
}

/// Classifies a domain from its raw count and derived metrics.
///
/// Domains without any archive signal are `Low Quality` with score 0. An
/// allow-listed domain is always `Recommended` with score 100, applied last.
pub fn classify(
    domain: &str,
    total_snapshots: usize,
    metrics: Option<&LongevityMetrics>,
    long_live: &LongLiveDomains,
) -> Quality {
    let years_covered = metrics.map_or(0, |m| m.years_covered);
    let avg_interval_days = metrics.map(|m| m.avg_interval_days);

    let has_signal = total_snapshots > 0
        || years_covered > 0
        || avg_interval_days.is_some_and(|avg| avg != 0.0);

    let quality = if has_signal {
        let score = heuristic_score(total_snapshots, years_covered, avg_interval_days);
        Quality {
            score,
            category: Category::from_score(score),
        }
    } else {
        Quality::no_signal()
    };

    if long_live.contains(domain) {
        Quality::long_live()
    } else {
        quality
    }
}
