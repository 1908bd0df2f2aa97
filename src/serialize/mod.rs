//! Patient form to fixed-width REDCap row.
//!
//! Every row has exactly [`RedcapSchema::len`] cells. Gene and variant slots
//! beyond the schema bounds are dropped; empty slots are filled with blank
//! fragments of the same width so later columns never shift.

use std::borrow::Cow;
use std::fmt;

use itertools::Itertools;

use crate::algorithm::VariantClassifier;
use crate::diagnostics::{DegradationKind, Diagnostics};
use crate::models::{GeneMention, PatientForm, PatientId, Variant};
use crate::schema::{
    GENE_FRAGMENT_WIDTH, MAXIMUM_GERMLINES, MAXIMUM_VARIANTS, RedcapSchema, VARIANT_FRAGMENT_WIDTH,
};

/// `sum_germ` choice code for "Yes"
pub const HAS_GERMLINE_YES: i64 = 1;

/// One output cell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    /// Empty field
    #[default]
    Blank,
    /// Whole number (counts, choice codes, MRNs)
    Integer(i64),
    /// Free text
    Text(String),
}

impl Cell {
    /// Text cell, blank when absent
    #[must_use]
    pub fn text(value: Option<&str>) -> Self {
        value.map_or(Self::Blank, |v| Self::Text(v.to_string()))
    }

    /// Integer cell from a count
    #[must_use]
    pub fn count(value: usize) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }

    /// Whether the cell is blank
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Text written to the output file
    #[must_use]
    pub fn as_field(&self) -> Cow<'_, str> {
        match self {
            Self::Blank => Cow::Borrowed(""),
            Self::Integer(value) => Cow::Owned(value.to_string()),
            Self::Text(value) => Cow::Borrowed(value),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_field())
    }
}

/// Serializes patient forms against the global schema
#[derive(Debug)]
pub struct RowSerializer<'a> {
    schema: &'static RedcapSchema,
    classifier: &'a VariantClassifier,
    diagnostics: &'a Diagnostics,
    id_prefix: Option<String>,
    warn_on_truncation: bool,
}

impl<'a> RowSerializer<'a> {
    /// Create a serializer; overflow is reported by default
    #[must_use]
    pub fn new(classifier: &'a VariantClassifier, diagnostics: &'a Diagnostics) -> Self {
        Self {
            schema: RedcapSchema::global(),
            classifier,
            diagnostics,
            id_prefix: None,
            warn_on_truncation: true,
        }
    }

    /// Prefix every patient identifier (smoke-test uploads)
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = Some(prefix.into());
        self
    }

    /// Whether dropped genes/variants are logged and recorded
    #[must_use]
    pub const fn with_truncation_warnings(mut self, enabled: bool) -> Self {
        self.warn_on_truncation = enabled;
        self
    }

    /// The schema rows are built against
    #[must_use]
    pub const fn schema(&self) -> &'static RedcapSchema {
        self.schema
    }

    /// Serialize one form into exactly `schema().len()` cells.
    ///
    /// Genes fill slots in symbol order and variants in identity-key order;
    /// anything past the last slot is omitted while the count cells report
    /// the clipped number.
    #[must_use]
    pub fn serialize(&self, form: &PatientForm) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.schema.len());

        cells.push(match (&form.patient_id, &self.id_prefix) {
            (PatientId::Mrn(mrn), None) => {
                i64::try_from(*mrn).map_or_else(|_| Cell::Text(mrn.to_string()), Cell::Integer)
            }
            (id, prefix) => Cell::Text(id.render(prefix.as_deref())),
        });
        cells.push(Cell::Integer(HAS_GERMLINE_YES));

        let genes = form.ordered_gene_mentions();
        cells.push(Cell::count(genes.len().min(MAXIMUM_GERMLINES)));
        if genes.len() > MAXIMUM_GERMLINES {
            self.report_overflow(
                DegradationKind::GeneOverflow,
                format!("patient {}", form.patient_id),
                genes[MAXIMUM_GERMLINES..]
                    .iter()
                    .map(|g| g.gene.as_deref().unwrap_or("unknown gene"))
                    .join(", "),
            );
        }

        for slot in 0..MAXIMUM_GERMLINES {
            match genes.get(slot) {
                Some(gene) => self.push_gene_fragment(&mut cells, form, gene),
                None => push_blank(&mut cells, GENE_FRAGMENT_WIDTH),
            }
        }

        debug_assert_eq!(cells.len(), self.schema.len());
        cells
    }

    fn push_gene_fragment(&self, cells: &mut Vec<Cell>, form: &PatientForm, gene: &GeneMention) {
        let variants = gene.ordered_variants();

        cells.push(Cell::text(gene.gene.as_deref()));
        cells.push(Cell::count(variants.len().min(MAXIMUM_VARIANTS)));
        if variants.len() > MAXIMUM_VARIANTS {
            self.report_overflow(
                DegradationKind::VariantOverflow,
                format!(
                    "patient {} gene {}",
                    form.patient_id,
                    gene.gene.as_deref().unwrap_or("unknown")
                ),
                variants[MAXIMUM_VARIANTS..]
                    .iter()
                    .map(|v| describe_variant(v))
                    .join(", "),
            );
        }

        for slot in 0..MAXIMUM_VARIANTS {
            match variants.get(slot) {
                Some(variant) => self.push_variant_fragment(cells, variant),
                None => push_blank(cells, VARIANT_FRAGMENT_WIDTH),
            }
        }
    }

    fn push_variant_fragment(&self, cells: &mut Vec<Cell>, variant: &Variant) {
        cells.push(Cell::text(variant.syntax_n()));
        cells.push(Cell::text(variant.syntax_p()));
        cells.push(
            self.classifier
                .classify(variant.variant_type(), self.diagnostics)
                .map_or(Cell::Blank, |class| Cell::Integer(i64::from(class.ordinal()))),
        );
        cells.push(Cell::Text(variant.comment()));
    }

    fn report_overflow(&self, kind: DegradationKind, context: String, dropped: String) {
        if self.warn_on_truncation {
            self.diagnostics
                .record(kind, context, format!("dropped: {dropped}"));
        }
    }
}

fn push_blank(cells: &mut Vec<Cell>, width: usize) {
    cells.extend(std::iter::repeat_n(Cell::Blank, width));
}

fn describe_variant(variant: &Variant) -> String {
    [variant.syntax_n(), variant.syntax_p()]
        .into_iter()
        .flatten()
        .join(" ")
}
