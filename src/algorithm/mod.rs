//! Algorithm implementations for the germline summary conversion
//!
//! This module contains the mention aggregation that builds patient forms
//! and the ACMG classification of variant significance text.

pub mod aggregate;
pub mod classify;

pub use aggregate::MentionAggregator;
pub use classify::{AcmgClass, VariantClassifier, classify_significance};
