//! Stats command
//!
//! Summarizes a recorded analytics file.

use crate::analytics::{AnalyticsSummary, summarize_file};
use std::io;
use std::path::Path;

/// Entries kept in each ranking
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// Summarize `path`; a missing file yields an empty summary
///
/// # Errors
///
/// Returns an I/O error for any read failure other than a missing file.
pub fn run_stats(path: &Path, limit: usize) -> io::Result<AnalyticsSummary> {
    match summarize_file(path, limit) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(AnalyticsSummary::default()),
        other => other,
    }
}
