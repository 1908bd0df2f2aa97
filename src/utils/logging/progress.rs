//! Progress reporting utilities for long-running operations
//!
//! This module provides standardized progress reporting functionality
//! for long-running operations, using the indicatif crate.

use indicatif::{ProgressBar, ProgressStyle};

/// Default style for a main progress bar
pub const DEFAULT_MAIN_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({per_sec}) {msg}";

/// Create a main progress bar with a standardized style
///
/// # Arguments
/// * `length` - Total length for the progress bar
/// * `description` - Optional description to display as the initial message
/// * `visible` - A hidden bar still counts but draws nothing
#[must_use]
pub fn create_main_progress_bar(
    length: u64,
    description: Option<&str>,
    visible: bool,
) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(DEFAULT_MAIN_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    if let Some(desc) = description {
        pb.set_message(desc.to_string());
    }

    pb
}

/// Finish a progress bar with a completion message
///
/// # Arguments
/// * `pb` - The `ProgressBar` to finish
/// * `message` - Optional completion message
pub fn finish_progress_bar(pb: &ProgressBar, message: Option<&str>) {
    if let Some(msg) = message {
        pb.finish_with_message(msg.to_string());
    } else {
        pb.finish();
    }
}
