//! Error handling for the REDCap conversion.
//!
//! Only conditions that make the whole run meaningless are errors. Per-row
//! problems (bad filenames, unclassifiable significance text, overflowing
//! repeating groups) are recorded in [`crate::diagnostics::Diagnostics`]
//! instead.

pub mod util;

use std::io;
use std::path::PathBuf;

use crate::formats::Format;

/// Errors that abort a conversion run
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Error opening, reading or writing a file
    #[error("IO error at {path}: {source}")]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// Error parsing or writing delimited text
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input table lacks a column the aggregation needs
    #[error("Required column '{0}' not found in input table")]
    MissingColumn(String),

    /// Input and output formats are identical
    #[error("Input and output formats are both {0}")]
    SameFormat(Format),

    /// The format pair has no conversion path
    #[error("{input} to {output} not currently supported")]
    UnsupportedFormats {
        /// Requested input format
        input: Format,
        /// Requested output format
        output: Format,
    },

    /// A format name could not be parsed
    #[error("Unknown format '{0}', expected one of RAW_TSV, REDCAP")]
    UnknownFormat(String),

    /// Error writing the diagnostics report
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Wrap an IO error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
