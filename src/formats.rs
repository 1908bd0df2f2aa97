//! Supported table formats and the conversion paths between them.

use std::fmt;
use std::str::FromStr;

use crate::error::{ConvertError, Result};

/// Table formats known to the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Tab-separated raw mention table produced by the extraction step
    RawTsv = 0,
    /// REDCap bulk-upload CSV
    Redcap = 1,
}

impl Format {
    /// The name used on the command line and in logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RawTsv => "RAW_TSV",
            Self::Redcap => "REDCAP",
        }
    }

    /// All known formats
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::RawTsv, Self::Redcap]
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::all()
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConvertError::UnknownFormat(s.to_string()))
    }
}

/// Check that a conversion path exists before any data is touched.
///
/// Only `RAW_TSV -> REDCAP` is supported.
pub fn ensure_supported(input: Format, output: Format) -> Result<()> {
    if input == output {
        log::error!("Input and output formats are both {input}, exiting");
        return Err(ConvertError::SameFormat(input));
    }
    match (input, output) {
        (Format::RawTsv, Format::Redcap) => Ok(()),
        _ => {
            log::error!("{input} to {output} not currently supported");
            Err(ConvertError::UnsupportedFormats { input, output })
        }
    }
}
