//! ACMG classification of free-text variant significance
//!
//! Significance text is reduced to four keyword signals and looked up in a
//! fixed table. Anything that does not match a row exactly stays unclassified;
//! contradictory text (e.g. both benign and pathogenic) is never guessed at.

use std::sync::{PoisonError, RwLock};

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::diagnostics::{DegradationKind, Diagnostics};

/// ACMG clinical significance tiers, numbered as the REDCap choice codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AcmgClass {
    /// Pathogenic
    Pathogenic = 1,
    /// Likely pathogenic
    LikelyPathogenic = 2,
    /// Benign
    Benign = 3,
    /// Likely benign
    LikelyBenign = 4,
    /// Variant of uncertain significance
    UncertainSignificance = 5,
}

impl AcmgClass {
    /// REDCap choice code
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }
}

/// Keyword signals found in a significance string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignificanceSignals {
    /// Contains "likely"
    pub likely: bool,
    /// Contains "benign"
    pub benign: bool,
    /// Contains "patho" (pathogenic, pathogenicity)
    pub pathogenic: bool,
    /// Contains "uncertain", "vus" or "unknown significance"
    pub uncertain: bool,
}

impl SignificanceSignals {
    /// Detect signals in already-normalized text
    #[must_use]
    pub fn detect(normalized: &str) -> Self {
        Self {
            likely: normalized.contains("likely"),
            benign: normalized.contains("benign"),
            pathogenic: normalized.contains("patho"),
            uncertain: ["uncertain", "vus", "unknown significance"]
                .iter()
                .any(|needle| normalized.contains(needle)),
        }
    }

    /// Exact table lookup; every other combination is unmapped
    #[must_use]
    pub const fn classify(self) -> Option<AcmgClass> {
        match (self.likely, self.benign, self.pathogenic, self.uncertain) {
            (false, false, true, false) => Some(AcmgClass::Pathogenic),
            (true, false, true, false) => Some(AcmgClass::LikelyPathogenic),
            (false, true, false, false) => Some(AcmgClass::Benign),
            (true, true, false, false) => Some(AcmgClass::LikelyBenign),
            (false, false, false, true) => Some(AcmgClass::UncertainSignificance),
            _ => None,
        }
    }
}

/// Lowercase and collapse runs of whitespace
#[must_use]
pub fn normalize_significance(text: &str) -> String {
    text.split_whitespace().map(str::to_lowercase).join(" ")
}

/// Classify a significance string without caching or reporting
#[must_use]
pub fn classify_significance(text: &str) -> Option<AcmgClass> {
    SignificanceSignals::detect(&normalize_significance(text)).classify()
}

/// Memoizing classifier shared across a run.
///
/// Each distinct input string is classified once; unmapped strings are
/// reported to the diagnostics collector on first sight only.
#[derive(Debug, Default)]
pub struct VariantClassifier {
    cache: RwLock<FxHashMap<String, Option<AcmgClass>>>,
}

impl VariantClassifier {
    /// Create a classifier with an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify variant significance text; absent text is unclassified
    /// without being reported.
    pub fn classify(
        &self,
        variant_type: Option<&str>,
        diagnostics: &Diagnostics,
    ) -> Option<AcmgClass> {
        let text = variant_type?;

        if let Some(cached) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(text)
        {
            return *cached;
        }

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = cache.get(text) {
            return *cached;
        }

        let class = classify_significance(text);
        if class.is_none() {
            diagnostics.record(
                DegradationKind::UnclassifiedSignificance,
                "variant type not mapped to an ACMG class",
                text,
            );
        }
        cache.insert(text.to_string(), class);
        class
    }

    /// Number of distinct strings classified so far
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
