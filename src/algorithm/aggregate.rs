//! Mention aggregation
//!
//! Groups raw mention rows by patient, then by gene, then by the variant
//! identity key, collecting every supporting row's dates, sample sources and
//! provenance into the resulting [`Variant`].

use std::collections::BTreeSet;
use std::hash::Hash;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::diagnostics::Diagnostics;
use crate::filename::FileDateCache;
use crate::models::{
    GeneMention, PatientForm, PatientId, RawMentionRow, TextSource, Variant, VariantKey,
};

/// Group rows by a key, returning groups in key order
fn group_rows<'r, K, F>(
    rows: impl IntoIterator<Item = &'r RawMentionRow>,
    key: F,
) -> Vec<(K, Vec<&'r RawMentionRow>)>
where
    K: Hash + Eq + Ord,
    F: Fn(&'r RawMentionRow) -> K,
{
    let mut groups: FxHashMap<K, Vec<&'r RawMentionRow>> = FxHashMap::default();
    for row in rows {
        groups.entry(key(row)).or_default().push(row);
    }
    groups
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .collect()
}

/// Builds patient forms from a raw mention table
#[derive(Debug)]
pub struct MentionAggregator<'a> {
    diagnostics: &'a Diagnostics,
    file_dates: FileDateCache,
}

impl<'a> MentionAggregator<'a> {
    /// Create an aggregator reporting degradations to `diagnostics`
    #[must_use]
    pub fn new(diagnostics: &'a Diagnostics) -> Self {
        Self {
            diagnostics,
            file_dates: FileDateCache::new(),
        }
    }

    /// Aggregate the full table into one form per patient, ordered by patient.
    ///
    /// Every row lands in some form: rows whose filename carries no MRN are
    /// grouped under a fallback identifier derived from the filename.
    #[must_use]
    pub fn aggregate(&self, rows: &[RawMentionRow]) -> Vec<PatientForm> {
        // Resolve each distinct filename once so a bad filename is reported once.
        let mut patient_ids: FxHashMap<&str, PatientId> = FxHashMap::default();
        for row in rows {
            if !patient_ids.contains_key(row.filename.as_str()) {
                let id = PatientId::resolve(&row.filename, self.diagnostics);
                patient_ids.insert(row.filename.as_str(), id);
            }
        }

        let forms: Vec<PatientForm> =
            group_rows(rows, |row| patient_ids[row.filename.as_str()].clone())
                .into_iter()
                .map(|(patient_id, patient_rows)| self.patient_form(patient_id, &patient_rows))
                .collect();

        log::debug!(
            "Aggregated {} mention rows into {} patient forms",
            rows.len(),
            forms.len()
        );
        forms
    }

    /// Build one patient's form from that patient's rows
    #[must_use]
    pub fn patient_form(&self, patient_id: PatientId, rows: &[&RawMentionRow]) -> PatientForm {
        let gene_mentions = group_rows(rows.iter().copied(), |row| row.gene.clone())
            .into_iter()
            .map(|(gene, gene_rows)| self.gene_mention(gene, &gene_rows))
            .collect();
        PatientForm::new(patient_id, gene_mentions)
    }

    /// Build one gene mention from the rows naming that gene
    #[must_use]
    pub fn gene_mention(&self, gene: Option<String>, rows: &[&RawMentionRow]) -> GeneMention {
        let variants = group_rows(rows.iter().copied(), |row| {
            VariantKey::new(
                row.syntax_n.as_deref(),
                row.syntax_p.as_deref(),
                row.variant_type.as_deref(),
                row.vaf.as_deref(),
            )
        })
        .into_iter()
        .map(|(key, variant_rows)| self.variant(gene.clone(), key, &variant_rows))
        .collect();
        GeneMention::new(gene, variants)
    }

    /// Build one variant from every row sharing its identity key
    #[must_use]
    pub fn variant(
        &self,
        gene: Option<String>,
        key: VariantKey,
        rows: &[&RawMentionRow],
    ) -> Variant {
        let specimen_collection_dates: BTreeSet<String> = rows
            .iter()
            .filter_map(|row| row.specimen_collection_date.clone())
            .collect();
        let sample_sources: BTreeSet<String> =
            rows.iter().filter_map(|row| row.sample_source.clone()).collect();
        let text_sources: BTreeSet<TextSource> = rows
            .iter()
            .map(|row| TextSource {
                filename: row.filename.clone(),
                section: row.section.clone(),
                sentence: row.sentence.clone(),
                file_date: self.file_dates.get(&row.filename, self.diagnostics),
            })
            .collect();

        Variant::new(gene, key, specimen_collection_dates, sample_sources, text_sources)
    }
}
