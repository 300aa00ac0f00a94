//! Long-live domain allow-list.
//!
//! Domains on this list are classified `Recommended` regardless of their archive
//! metrics. The list is loaded once by the composition root and shared
//! read-only (`Arc<LongLiveDomains>`) by every analysis.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::LONG_LIVE_FILE_NAME;

use super::normalize_domain;

/// Read-only set of normalized long-live domain names.
#[derive(Debug, Clone, Default)]
pub struct LongLiveDomains {
    domains: HashSet<String>,
}

impl LongLiveDomains {
    /// An empty allow-list.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the list from line-delimited text.
    ///
    /// Lines are trimmed and lowercased; blank lines and `#` comments are ignored.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = lines
            .into_iter()
            .filter_map(|line| {
                let line = line.as_ref().trim();
                if line.is_empty() || line.starts_with('#') {
                    None
                } else {
                    Some(normalize_domain(line))
                }
            })
            .collect();
        Self { domains }
    }

    /// Reads the list from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read as UTF-8 text.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read long-live domains from {}", path.display()))?;
        Ok(Self::from_lines(content.lines()))
    }

    /// Loads the list from the first existing candidate file.
    ///
    /// Candidates, in order: `explicit`, `long_live_domains.txt` in the working
    /// directory, `long_live_domains.txt` next to the executable. A candidate that
    /// exists but cannot be read is logged and skipped. Never fails: without a
    /// readable candidate the list is empty.
    pub fn load(explicit: Option<&Path>) -> Self {
        for candidate in Self::candidate_paths(explicit) {
            if !candidate.exists() {
                continue;
            }
            match Self::from_path(&candidate) {
                Ok(list) => {
                    info!(
                        "Loaded {} long-live domains from {}",
                        list.len(),
                        candidate.display()
                    );
                    return list;
                }
                Err(e) => warn!("{e:#}"),
            }
        }

        if let Some(path) = explicit {
            warn!(
                "Long-live domains file {} not found, continuing with an empty list",
                path.display()
            );
        } else {
            info!("No long-live domains loaded.");
        }
        Self::empty()
    }

    /// Files `load` looks at, in priority order.
    pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(path) = explicit {
            candidates.push(path.to_path_buf());
        }
        candidates.push(PathBuf::from(LONG_LIVE_FILE_NAME));
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                candidates.push(exe_dir.join(LONG_LIVE_FILE_NAME));
            }
        }
        candidates
    }

    /// Set membership for an already normalized domain.
    pub fn contains(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for LongLiveDomains {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_lines(iter)
    }
}
