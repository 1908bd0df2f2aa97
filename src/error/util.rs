//! Utility functions for error handling
//!
//! File-system helpers that attach the offending path to every IO failure.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{ConvertError, Result};

/// Open an input file, reporting why it was needed if that fails
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.is_file() {
        let kind = if path.exists() {
            io::ErrorKind::InvalidInput
        } else {
            io::ErrorKind::NotFound
        };
        return Err(ConvertError::io(
            path,
            io::Error::new(kind, format!("expected a readable file for: {purpose}")),
        ));
    }

    fs::File::open(path).map_err(|e| ConvertError::io(path, e))
}

/// Make sure an output directory exists, creating it if needed
pub fn ensure_directory(path: &Path, purpose: &str) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(ConvertError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("expected a directory for: {purpose}"),
            ),
        ));
    }

    log::info!("Creating {} directory {}", purpose, path.display());
    fs::create_dir_all(path).map_err(|e| ConvertError::io(path, e))
}

/// Create (or truncate) an output file
pub fn safe_create_file(path: &Path) -> Result<fs::File> {
    fs::File::create(path).map_err(|e| ConvertError::io(path, e))
}
