//! Command-line application helpers.
//!
//! Input reading and end-of-run statistics used by the binary.

pub mod input;
pub mod statistics;

pub use input::{parse_domain_lines, read_domains};
pub use statistics::{print_batch_summary, print_error_statistics, BatchSummary};
