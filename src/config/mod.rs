//! Configuration for a conversion run.

use std::fmt;
use std::path::PathBuf;

use crate::formats::Format;
use crate::models::UNKNOWN_SENTINEL;
use crate::schema::HeaderStyle;

/// Prefix applied to patient identifiers in smoke-test mode
pub const SMOKE_TEST_PREFIX: &str = "UPLOAD_TEST_";

/// Rows kept in smoke-test mode
pub const SMOKE_TEST_ROWS: usize = 2;

/// Default output filename
pub const DEFAULT_OUTPUT_FILENAME: &str = "redcap_upload.csv";

/// Configuration for one conversion run
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Raw mention table to read
    pub data_location: PathBuf,
    /// Directory the upload file is written to
    pub output_dir: PathBuf,
    /// Name of the upload file
    pub output_filename: String,
    /// Format of the input table
    pub input_format: Format,
    /// Format of the output table
    pub output_format: Format,
    /// Prefix identifiers and keep only the first few rows
    pub smoke_test: bool,
    /// Prefix used in smoke-test mode
    pub smoke_test_prefix: String,
    /// Rows kept in smoke-test mode
    pub smoke_test_rows: usize,
    /// Cell text the extraction step uses for "unknown"
    pub unknown_sentinel: String,
    /// Log and record genes/variants dropped for lack of slots
    pub warn_on_truncation: bool,
    /// Header text written above the columns
    pub header_style: HeaderStyle,
    /// Where to write the degradation report as JSON, if anywhere
    pub diagnostics_report: Option<PathBuf>,
    /// Show a progress bar while serializing
    pub show_progress: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            data_location: PathBuf::new(),
            output_dir: PathBuf::from("."),
            output_filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            input_format: Format::RawTsv,
            output_format: Format::Redcap,
            smoke_test: false,
            smoke_test_prefix: SMOKE_TEST_PREFIX.to_string(),
            smoke_test_rows: SMOKE_TEST_ROWS,
            unknown_sentinel: UNKNOWN_SENTINEL.to_string(),
            warn_on_truncation: true,
            header_style: HeaderStyle::VariableNames,
            diagnostics_report: None,
            show_progress: false,
        }
    }
}

impl ConversionConfig {
    /// Config for converting `data_location` into `output_dir` with defaults
    #[must_use]
    pub fn new(data_location: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_location: data_location.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Full path of the upload file
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }

    /// Identifier prefix to apply, if in smoke-test mode
    #[must_use]
    pub fn id_prefix(&self) -> Option<&str> {
        self.smoke_test.then_some(self.smoke_test_prefix.as_str())
    }

    /// Row limit to apply, if in smoke-test mode
    #[must_use]
    pub fn row_limit(&self) -> Option<usize> {
        self.smoke_test.then_some(self.smoke_test_rows)
    }
}

impl fmt::Display for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conversion Configuration:")?;
        writeln!(f, "  Input: {} ({})", self.data_location.display(), self.input_format)?;
        writeln!(
            f,
            "  Output: {} ({})",
            self.output_path().display(),
            self.output_format
        )?;
        if self.smoke_test {
            writeln!(
                f,
                "  Smoke Test: first {} rows, identifiers prefixed with {}",
                self.smoke_test_rows, self.smoke_test_prefix
            )?;
        }
        writeln!(f, "  Unknown Sentinel: {}", self.unknown_sentinel)?;
        writeln!(f, "  Truncation Warnings: {}", self.warn_on_truncation)?;
        writeln!(f, "  Header Style: {:?}", self.header_style)?;
        if let Some(report) = &self.diagnostics_report {
            writeln!(f, "  Diagnostics Report: {}", report.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConversionConfig::new("in.tsv", "out");
        assert_eq!(config.output_path(), PathBuf::from("out").join("redcap_upload.csv"));
        assert_eq!(config.id_prefix(), None);
        assert_eq!(config.row_limit(), None);
        assert_eq!(config.unknown_sentinel, "__UNK__");
    }

    #[test]
    fn test_smoke_test_settings() {
        let config = ConversionConfig {
            smoke_test: true,
            ..ConversionConfig::new("in.tsv", "out")
        };
        assert_eq!(config.id_prefix(), Some("UPLOAD_TEST_"));
        assert_eq!(config.row_limit(), Some(2));
        assert!(config.to_string().contains("Smoke Test"));
    }
}
