//! Logging helpers for table reads and writes

use std::path::Path;
use std::time::Duration;

use itertools::Itertools;

use crate::diagnostics::Diagnostics;

/// Log that a table is about to be read or written
///
/// # Arguments
/// * `action` - What is happening, e.g. "Reading raw mentions"
/// * `path` - Table location
pub fn log_table_start(action: &str, path: &Path) {
    log::info!("{action}: {}", path.display());
}

/// Log a finished table read or write
///
/// # Arguments
/// * `action` - What happened, e.g. "Read" or "Wrote"
/// * `path` - Table location
/// * `rows` - Data rows (header excluded)
/// * `elapsed` - Time taken
pub fn log_table_done(action: &str, path: &Path, rows: usize, elapsed: Duration) {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        #[allow(clippy::cast_precision_loss)]
        let rate = rows as f64 / secs;
        log::info!(
            "{action} {rows} rows ({}) in {elapsed:.2?}, {rate:.0} rows/s",
            path.display()
        );
    } else {
        log::info!("{action} {rows} rows ({})", path.display());
    }
}

/// Log per-kind degradation totals, or nothing if the run was clean
pub fn log_diagnostics_summary(diagnostics: &Diagnostics) {
    let summary = diagnostics.summary();
    if summary.is_empty() {
        return;
    }
    let totals = summary
        .into_iter()
        .sorted()
        .map(|(kind, count)| format!("{kind}: {count}"))
        .join(", ");
    log::warn!("Recovered from degraded input ({totals})");
}
