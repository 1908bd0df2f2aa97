//! Logging utilities for output and progress tracking
//!
//! This module provides utilities for operation logging and progress tracking.

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use self::log::{log_diagnostics_summary, log_table_done, log_table_start};
pub use progress::{create_main_progress_bar, finish_progress_bar};
