//! Canonical variant records and their provenance.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use itertools::Itertools;

use crate::filename::original_filename;

/// Where a mention was read from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextSource {
    /// Source document filename
    pub filename: String,
    /// Section label within the document
    pub section: Option<String>,
    /// Sentence containing the mention
    pub sentence: Option<String>,
    /// Report date read from the filename
    pub file_date: Option<NaiveDate>,
}

/// The attributes that decide whether two mentions are the same variant.
///
/// Absent values compare equal to each other and never equal to a present
/// value. The derived ordering (absent first, field by field) is the slot
/// order used when serializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    /// Nucleotide (cDNA) syntax
    pub syntax_n: Option<String>,
    /// Protein syntax
    pub syntax_p: Option<String>,
    /// Variant type / significance free text
    pub variant_type: Option<String>,
    /// Allele frequency or zygosity free text
    pub vaf: Option<String>,
}

impl VariantKey {
    /// Build a key from the four identity attributes
    #[must_use]
    pub fn new(
        syntax_n: Option<&str>,
        syntax_p: Option<&str>,
        variant_type: Option<&str>,
        vaf: Option<&str>,
    ) -> Self {
        Self {
            syntax_n: syntax_n.map(str::to_string),
            syntax_p: syntax_p.map(str::to_string),
            variant_type: variant_type.map(str::to_string),
            vaf: vaf.map(str::to_string),
        }
    }
}

/// Zygosity stated outright in the Vaf text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zygosity {
    /// One allele carries the variant
    Heterozygous,
    /// Both alleles carry the variant
    Homozygous,
    /// The only allele carries it (X-linked in males, for example)
    Hemizygous,
}

impl Zygosity {
    /// Read zygosity from the Vaf text; frequencies and other text give `None`
    #[must_use]
    pub fn from_vaf(vaf: Option<&str>) -> Option<Self> {
        match vaf.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("heterozygous") => Some(Self::Heterozygous),
            Some("homozygous") => Some(Self::Homozygous),
            Some("hemizygous") => Some(Self::Hemizygous),
            _ => None,
        }
    }

    /// Word used in comments
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heterozygous => "heterozygous",
            Self::Homozygous => "homozygous",
            Self::Hemizygous => "hemizygous",
        }
    }

    /// Whether this counts as heterozygous
    #[must_use]
    pub const fn is_heterozygous(self) -> bool {
        matches!(self, Self::Heterozygous)
    }
}

/// Heterozygosity implied by the Vaf text, `None` when it says nothing about it
#[must_use]
pub fn heterozygosity_from_vaf(vaf: Option<&str>) -> Option<bool> {
    Zygosity::from_vaf(vaf).map(Zygosity::is_heterozygous)
}

/// One distinct variant of one gene in one patient's record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Gene symbol
    pub gene: Option<String>,
    /// Identity attributes
    pub key: VariantKey,
    /// Zygosity stated in the Vaf text
    pub zygosity: Option<Zygosity>,
    /// Heterozygosity derived from the Vaf text
    pub heterozygous: Option<bool>,
    /// Specimen collection dates seen across mentions
    pub specimen_collection_dates: BTreeSet<String>,
    /// Sample sources seen across mentions
    pub sample_sources: BTreeSet<String>,
    /// Every mention supporting this variant
    pub text_sources: BTreeSet<TextSource>,
}

impl Variant {
    /// Create a variant; heterozygosity is derived from the key's Vaf
    #[must_use]
    pub fn new(
        gene: Option<String>,
        key: VariantKey,
        specimen_collection_dates: BTreeSet<String>,
        sample_sources: BTreeSet<String>,
        text_sources: BTreeSet<TextSource>,
    ) -> Self {
        let zygosity = Zygosity::from_vaf(key.vaf.as_deref());
        Self {
            gene,
            key,
            zygosity,
            heterozygous: zygosity.map(Zygosity::is_heterozygous),
            specimen_collection_dates,
            sample_sources,
            text_sources,
        }
    }

    /// Nucleotide syntax
    #[must_use]
    pub fn syntax_n(&self) -> Option<&str> {
        self.key.syntax_n.as_deref()
    }

    /// Protein syntax
    #[must_use]
    pub fn syntax_p(&self) -> Option<&str> {
        self.key.syntax_p.as_deref()
    }

    /// Significance free text
    #[must_use]
    pub fn variant_type(&self) -> Option<&str> {
        self.key.variant_type.as_deref()
    }

    /// Vaf / zygosity free text
    #[must_use]
    pub fn vaf(&self) -> Option<&str> {
        self.key.vaf.as_deref()
    }

    /// Number of distinct source documents, ignoring which extraction
    /// process read them
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.text_sources
            .iter()
            .map(|source| original_filename(&source.filename))
            .unique()
            .count()
    }

    /// Earliest report date among the supporting documents
    #[must_use]
    pub fn earliest_report(&self) -> Option<NaiveDate> {
        self.text_sources.iter().filter_map(|s| s.file_date).min()
    }

    /// Free-text summary for the REDCap comment field
    #[must_use]
    pub fn comment(&self) -> String {
        let mut parts = Vec::new();

        let summary = [self.gene.as_deref(), self.syntax_n(), self.syntax_p()]
            .into_iter()
            .flatten()
            .join(" ");
        if !summary.is_empty() {
            parts.push(summary);
        }

        if let Some(zygosity) = self.zygosity {
            parts.push(zygosity.as_str().to_string());
        }

        match self.document_count() {
            0 => {}
            1 => parts.push("1 source document".to_string()),
            n => parts.push(format!("{n} source documents")),
        }

        if let Some(date) = self.earliest_report() {
            parts.push(format!("earliest report {date}"));
        }

        parts.join("; ")
    }
}
