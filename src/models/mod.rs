//! Domain models for the germline summary conversion
//!
//! Raw mention rows flow upward into variants, gene mentions and one form per
//! patient. All aggregates are plain values owned by the run that built them.

pub mod form;
pub mod mention;
pub mod variant;

// Re-export commonly used types
pub use form::{GeneMention, PatientForm, PatientId};
pub use mention::{REQUIRED_COLUMNS, RawMentionRow, UNKNOWN_SENTINEL};
pub use variant::{TextSource, Variant, VariantKey, Zygosity, heterozygosity_from_vaf};
