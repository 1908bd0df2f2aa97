//! Converts per-document gene/variant mention tables into one wide SCNIR
//! germline summary row per patient, ready for REDCap bulk upload.

pub mod algorithm;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filename;
pub mod formats;
pub mod models;
pub mod pipeline;
pub mod schema;
pub mod serialize;
pub mod utils;

// Re-export the most common types for easier use
pub use algorithm::{AcmgClass, MentionAggregator, VariantClassifier, classify_significance};
pub use config::ConversionConfig;
pub use diagnostics::{Degradation, DegradationKind, Diagnostics};
pub use error::{ConvertError, Result};
pub use formats::Format;
pub use models::{GeneMention, PatientForm, PatientId, RawMentionRow, Variant, VariantKey};
pub use pipeline::{ConversionReport, OutputTable, build_output_table, convert};
pub use schema::{HeaderStyle, RedcapSchema};
pub use serialize::{Cell, RowSerializer};
