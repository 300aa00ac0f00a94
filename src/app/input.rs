//! Domain list input.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Extracts domain entries from line-delimited text.
///
/// Lines are trimmed; blank lines and `#` comments are dropped. Duplicates are
/// kept so every input line gets its own report.
pub fn parse_domain_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    lines
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reads domains from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a line cannot be read.
pub async fn read_domains(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        read_from(tokio::io::stdin())
            .await
            .context("Failed to read domains from stdin")
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open input file {}", path.display()))?;
        read_from(file)
            .await
            .with_context(|| format!("Failed to read domains from {}", path.display()))
    }
}

async fn read_from<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<String>> {
    let mut lines = BufReader::new(reader).lines();
    let mut raw = Vec::new();
    while let Some(line) = lines.next_line().await? {
        raw.push(line);
    }
    Ok(parse_domain_lines(raw.iter().map(String::as_str)))
}
