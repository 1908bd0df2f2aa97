//! Structured record of every degradation taken during a run.
//!
//! Each fallback path logs as before and also appends a [`Degradation`], so
//! callers (and tests) can see exactly which inputs were defaulted, left
//! blank or dropped.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;
use serde::Serialize;

/// What kind of best-effort recovery happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegradationKind {
    /// No MRN could be read from the filename; a fallback identifier was used
    MalformedFilename,
    /// No date could be read from the filename
    UnparseableFileDate,
    /// Variant significance text did not map onto an ACMG class
    UnclassifiedSignificance,
    /// A patient had more genes than the form has slots for
    GeneOverflow,
    /// A gene had more variants than the form has slots for
    VariantOverflow,
}

impl DegradationKind {
    /// Whether this kind is logged at error level (otherwise warn)
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::MalformedFilename | Self::UnparseableFileDate)
    }
}

impl fmt::Display for DegradationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MalformedFilename => "malformed filename",
            Self::UnparseableFileDate => "unparseable file date",
            Self::UnclassifiedSignificance => "unclassified significance",
            Self::GeneOverflow => "gene overflow",
            Self::VariantOverflow => "variant overflow",
        };
        f.write_str(name)
    }
}

/// One recorded degradation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Degradation {
    /// Kind of degradation
    pub kind: DegradationKind,
    /// Where it happened (patient, gene, ...)
    pub context: String,
    /// The original input that could not be used as-is
    pub input: String,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind, self.context, self.input)
    }
}

/// Thread-safe degradation collector shared by one conversion run
#[derive(Debug, Default)]
pub struct Diagnostics {
    records: Mutex<Vec<Degradation>>,
}

impl Diagnostics {
    /// Create an empty collector
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and record a degradation
    pub fn record(
        &self,
        kind: DegradationKind,
        context: impl Into<String>,
        input: impl Into<String>,
    ) {
        let degradation = Degradation {
            kind,
            context: context.into(),
            input: input.into(),
        };
        if kind.is_error() {
            log::error!("{degradation}");
        } else {
            log::warn!("{degradation}");
        }
        self.lock().push(degradation);
    }

    /// Snapshot of everything recorded so far, in recording order
    #[must_use]
    pub fn records(&self) -> Vec<Degradation> {
        self.lock().clone()
    }

    /// Records of a single kind
    #[must_use]
    pub fn of_kind(&self, kind: DegradationKind) -> Vec<Degradation> {
        self.lock()
            .iter()
            .filter(|record| record.kind == kind)
            .cloned()
            .collect()
    }

    /// Number of records of a single kind
    #[must_use]
    pub fn count(&self, kind: DegradationKind) -> usize {
        self.lock().iter().filter(|record| record.kind == kind).count()
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Per-kind totals
    #[must_use]
    pub fn summary(&self) -> FxHashMap<DegradationKind, usize> {
        let mut counts = FxHashMap::default();
        for record in self.lock().iter() {
            *counts.entry(record.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Serialize all records as pretty JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.lock())
    }

    // A panic while holding the lock leaves the Vec intact, so keep going.
    fn lock(&self) -> MutexGuard<'_, Vec<Degradation>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
