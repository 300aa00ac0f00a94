//! JSON Lines export.

use std::io::Write;

use anyhow::{Context, Result};

use crate::report::Report;

/// Writes one JSON object per report, newline-terminated.
pub fn write_jsonl<W: Write>(reports: &[Report], mut writer: W) -> Result<usize> {
    for report in reports {
        serde_json::to_writer(&mut writer, report)
            .with_context(|| format!("Failed to serialize report for {}", report.domain))?;
        writer.write_all(b"\n").context("Failed to write report")?;
    }
    writer.flush().context("Failed to flush JSONL output")?;
    Ok(reports.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::{CaptureRecord, RawCaptureSet};
    use crate::metrics::{derive_metrics, Category, Quality};
    use serde_json::Value;

    #[test]
    fn test_write_jsonl_lines() {
        let raw = RawCaptureSet {
            domain: "example.com".to_string(),
            records: vec![CaptureRecord {
                timestamp: "20190101000000".to_string(),
                original_url: "http://example.com/".to_string(),
                digest: "X".to_string(),
            }],
            ..RawCaptureSet::default()
        };
        let metrics = derive_metrics(&raw);
        let reports = vec![
            Report::completed(
                raw,
                metrics,
                Quality {
                    score: 0,
                    category: Category::LowQuality,
                },
                0.5,
            ),
            Report::failed("broken.example", "session failed", 0.0),
        ];

        let mut out = Vec::new();
        assert_eq!(write_jsonl(&reports, &mut out).expect("write"), 2);

        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).expect("valid json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["years_covered"], 1);
        assert_eq!(lines[0]["snapshots_per_year"]["2019"], 1);
        assert_eq!(lines[1]["status"], "error");
        assert!(lines[1].get("first_snapshot").is_none());
    }
}
