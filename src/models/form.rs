//! Per-gene and per-patient aggregates.

use std::fmt;

use crate::diagnostics::{DegradationKind, Diagnostics};
use crate::filename::resolve_patient_id;
use crate::models::variant::Variant;

/// Patient identifier
///
/// MRNs order numerically and before unresolved identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PatientId {
    /// Medical record number read from the filename
    Mrn(u64),
    /// Fallback for a filename with no readable MRN; keeps the filename so
    /// rows from the same document still group together
    Unresolved(String),
}

impl PatientId {
    /// Resolve the patient for a filename, falling back (and recording the
    /// failure) when no MRN can be read.
    pub fn resolve(filename: &str, diagnostics: &Diagnostics) -> Self {
        match resolve_patient_id(filename) {
            Ok(mrn) => Self::Mrn(mrn),
            Err(e) => {
                diagnostics.record(DegradationKind::MalformedFilename, e.to_string(), filename);
                Self::Unresolved(filename.to_string())
            }
        }
    }

    /// Whether this is a real MRN
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Mrn(_))
    }

    /// Text for the `patient_id` cell, with an optional prefix
    #[must_use]
    pub fn render(&self, prefix: Option<&str>) -> String {
        match prefix {
            Some(prefix) => format!("{prefix}{self}"),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mrn(mrn) => write!(f, "{mrn}"),
            Self::Unresolved(filename) => write!(f, "UNRESOLVED_{filename}"),
        }
    }
}

/// One gene and every distinct variant reported for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneMention {
    /// Gene symbol, `None` when the extraction marked it unknown
    pub gene: Option<String>,
    /// Distinct variants; unbounded here, clipped only when serialized
    pub variants: Vec<Variant>,
}

impl GeneMention {
    /// Create a gene mention
    #[must_use]
    pub fn new(gene: Option<String>, variants: Vec<Variant>) -> Self {
        Self { gene, variants }
    }

    /// Variants in slot order (by identity key)
    #[must_use]
    pub fn ordered_variants(&self) -> Vec<&Variant> {
        let mut variants: Vec<&Variant> = self.variants.iter().collect();
        variants.sort_by(|a, b| a.key.cmp(&b.key));
        variants
    }
}

/// Everything known about one patient's germline findings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientForm {
    /// Patient identifier
    pub patient_id: PatientId,
    /// Genes mentioned; unbounded here, clipped only when serialized
    pub gene_mentions: Vec<GeneMention>,
}

impl PatientForm {
    /// Create a form
    #[must_use]
    pub fn new(patient_id: PatientId, gene_mentions: Vec<GeneMention>) -> Self {
        Self {
            patient_id,
            gene_mentions,
        }
    }

    /// Gene mentions in slot order: by symbol, unknown symbol last
    #[must_use]
    pub fn ordered_gene_mentions(&self) -> Vec<&GeneMention> {
        let mut genes: Vec<&GeneMention> = self.gene_mentions.iter().collect();
        genes.sort_by(|a, b| {
            (a.gene.is_none(), &a.gene).cmp(&(b.gene.is_none(), &b.gene))
        });
        genes
    }

    /// Total distinct variants across all genes
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.gene_mentions.iter().map(|g| g.variants.len()).sum()
    }
}
