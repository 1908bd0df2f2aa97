//! Patient identifier and report date extraction from source filenames.
//!
//! Extracted document filenames look like
//! `<process>_<mrn><suffix>-..-<month>_<day>_<year>[-lab]`.

use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::diagnostics::{DegradationKind, Diagnostics};

/// Reasons a filename could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    /// No `_`-separated segment after the process prefix
    #[error("no MRN segment in filename '{0}'")]
    MissingMrnSegment(String),
    /// The MRN segment does not start with digits
    #[error("MRN segment of '{0}' does not start with digits")]
    NonNumericMrn(String),
    /// The MRN does not fit in 64 bits
    #[error("MRN in '{0}' is out of range")]
    MrnOutOfRange(String),
    /// No `month_day_year` token where the date should be
    #[error("bad filename, no date information: {0}")]
    MissingDate(String),
}

/// The source document name, without the extraction process prefix.
///
/// A name with no prefix is returned whole.
#[must_use]
pub fn original_filename(filename: &str) -> &str {
    filename
        .split_once('_')
        .map_or(filename, |(_, original)| original)
}

/// Read the MRN from a filename: the leading digits of its second `_` segment.
pub fn resolve_patient_id(filename: &str) -> Result<u64, FilenameError> {
    let segment = filename
        .split('_')
        .nth(1)
        .ok_or_else(|| FilenameError::MissingMrnSegment(filename.to_string()))?;

    let digits_end = segment
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(segment.len());
    let digits = &segment[..digits_end];
    if digits.is_empty() {
        return Err(FilenameError::NonNumericMrn(filename.to_string()));
    }

    digits
        .parse()
        .map_err(|_| FilenameError::MrnOutOfRange(filename.to_string()))
}

/// Read the report date from a filename.
///
/// The date is the last `-` segment, or the one before it for `lab` reports,
/// written as `month_day_year`.
pub fn parse_file_date(filename: &str) -> Result<NaiveDate, FilenameError> {
    let missing = || FilenameError::MissingDate(filename.to_string());

    let segments: Vec<&str> = filename.split('-').collect();
    let raw_date = if filename.ends_with("lab") {
        segments.len().checked_sub(2).map(|i| segments[i])
    } else {
        segments.last().copied()
    }
    .ok_or_else(missing)?;

    let parts = raw_date
        .split('_')
        .map(|part| part.parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| missing())?;

    match parts.as_slice() {
        &[month, day, year] => i32::try_from(year)
            .ok()
            .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
            .ok_or_else(missing),
        _ => Err(missing()),
    }
}

/// Read-through cache over [`parse_file_date`].
///
/// The same filename recurs on every mention row it produced, so each
/// distinct filename is parsed (and, on failure, reported) once.
#[derive(Debug, Default)]
pub struct FileDateCache {
    dates: RwLock<FxHashMap<String, Option<NaiveDate>>>,
}

impl FileDateCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Date for a filename, `None` if it has none
    pub fn get(&self, filename: &str, diagnostics: &Diagnostics) -> Option<NaiveDate> {
        if let Some(cached) = self
            .dates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(filename)
        {
            return *cached;
        }

        let mut dates = self.dates.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have filled it in between the two locks.
        if let Some(cached) = dates.get(filename) {
            return *cached;
        }

        let date = match parse_file_date(filename) {
            Ok(date) => Some(date),
            Err(e) => {
                diagnostics.record(
                    DegradationKind::UnparseableFileDate,
                    e.to_string(),
                    filename,
                );
                None
            }
        };
        dates.insert(filename.to_string(), date);
        date
    }

    /// Number of distinct filenames seen
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no filename has been seen yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
