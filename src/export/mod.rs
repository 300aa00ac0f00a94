//! Report export.
//!
//! Reports can be written as JSON Lines (one object per line, nested metrics
//! preserved) or CSV (flattened, one row per domain).

mod csv;
mod jsonl;

use std::io::{self, ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ExportFormat;
use crate::report::Report;

pub use self::csv::write_csv;
pub use self::jsonl::write_jsonl;

/// Writes `reports` to `output`, or stdout when `output` is `None`.
///
/// Returns the number of reports written.
///
/// # Errors
///
/// Returns an error if the output file cannot be created or written.
pub fn write_reports(reports: &[Report], format: ExportFormat, output: Option<&Path>) -> Result<usize> {
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(io::BufWriter::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(IgnoreBrokenPipe::new(io::stdout().lock())),
    };

    match format {
        ExportFormat::Jsonl => write_jsonl(reports, writer),
        ExportFormat::Csv => write_csv(reports, writer),
    }
}

/// Writer that swallows `BrokenPipe`, so `| head` does not fail the run.
pub(crate) struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub(crate) fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}
