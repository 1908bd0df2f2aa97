//! The SCNIR germline summary column layout.
//!
//! This is the one authoritative definition of the output columns. The row
//! serializer and the tests both read it, so a column cannot be added here
//! without the row width changing with it.

use std::fmt;
use std::sync::OnceLock;

/// Version tag of the column layout
pub const SCHEMA_VERSION: &str = "scnir-germline-summary/v3";

/// First germline (gene) slot
pub const MINIMUM_GERMLINES: usize = 1;
/// Last germline (gene) slot
pub const MAXIMUM_GERMLINES: usize = 3;
/// First variant slot within a gene
pub const MINIMUM_VARIANTS: usize = 1;
/// Last variant slot within a gene
pub const MAXIMUM_VARIANTS: usize = 4;

/// Cells per form header: patient id, any-germline flag, gene count
pub const FORM_HEADER_WIDTH: usize = 3;
/// Cells per variant slot
pub const VARIANT_FRAGMENT_WIDTH: usize = VariantField::ALL.len();
/// Cells per gene slot: symbol, variant count, then every variant slot
pub const GENE_FRAGMENT_WIDTH: usize = 2 + MAXIMUM_VARIANTS * VARIANT_FRAGMENT_WIDTH;
/// Total number of columns
pub const COLUMN_COUNT: usize = FORM_HEADER_WIDTH + MAXIMUM_GERMLINES * GENE_FRAGMENT_WIDTH;

/// Which header text to write above the columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderStyle {
    /// REDCap variable names, as the data import tool expects
    #[default]
    VariableNames,
    /// Human-readable field labels, as REDCap exports them
    Labels,
}

/// Per-variant fields, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantField {
    /// cDNA syntax
    Cdna,
    /// Protein syntax
    Protein,
    /// ACMG classification choice code
    Acmg,
    /// Free-text comment
    Comment,
}

impl VariantField {
    /// All fields in column order
    pub const ALL: [Self; 4] = [Self::Cdna, Self::Protein, Self::Acmg, Self::Comment];

    const fn variable(self) -> &'static str {
        match self {
            Self::Cdna => "cdna",
            Self::Protein => "pro",
            Self::Acmg => "acmg",
            Self::Comment => "comment",
        }
    }
}

/// What a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnSlot {
    /// Patient identifier
    PatientId,
    /// Whether any germline variant was identified
    HasGermline,
    /// Number of genes with germline variants (clipped)
    GeneCount,
    /// Gene symbol of a germline slot
    Gene {
        /// 1-based germline slot
        germline: usize,
    },
    /// Number of variants in a germline slot's gene (clipped)
    VariantCount {
        /// 1-based germline slot
        germline: usize,
    },
    /// One field of one variant slot
    Variant {
        /// 1-based germline slot
        germline: usize,
        /// 1-based variant slot
        variant: usize,
        /// Field within the variant
        field: VariantField,
    },
}

impl ColumnSlot {
    /// REDCap variable name
    #[must_use]
    pub fn variable_name(self) -> String {
        match self {
            Self::PatientId => "patient_id".to_string(),
            Self::HasGermline => "sum_germ".to_string(),
            Self::GeneCount => "sum_germ_num_gen".to_string(),
            Self::Gene { germline } => format!("sum_germ_gene_{germline}"),
            Self::VariantCount { germline } => format!("sum_germ_num_var_{germline}"),
            Self::Variant {
                germline,
                variant,
                field,
            } => format!("sum_germ_var{variant}_{}_{germline}", field.variable()),
        }
    }

    /// Human-readable field label
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::PatientId => "Subject ID:".to_string(),
            Self::HasGermline => "Were any potentially disease-causing GERMLINE (including mitochondrial and copy number) variants identified on any clinical or research sequencing tests?".to_string(),
            Self::GeneCount => "How many GENES with germline variants and/or copy number variants were identified?".to_string(),
            Self::Gene { germline } => format!("Germline variant(s) gene [{germline}]:"),
            Self::VariantCount { germline } => {
                format!("Number of germline variants in gene [{germline}]:")
            }
            Self::Variant {
                germline,
                variant,
                field,
            } => {
                let name = variant_label(variant);
                match field {
                    VariantField::Cdna => format!("Germline variant {name} (cDNA) [{germline}]:"),
                    VariantField::Protein => {
                        format!("Germline variant {name} (protein) [{germline}]:")
                    }
                    VariantField::Acmg => {
                        format!("Germline variant {name} ACMG classification [{germline}]:")
                    }
                    VariantField::Comment => {
                        format!("Germline variant {name} comment [{germline}]:")
                    }
                }
            }
        }
    }
}

// Slots 1 and 2 are the maternal and paternal alleles on the form.
fn variant_label(variant: usize) -> String {
    match variant {
        1 => "1/maternal allele variant".to_string(),
        2 => "2/paternal allele variant".to_string(),
        n => n.to_string(),
    }
}

/// One output column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// REDCap variable name
    pub name: String,
    /// Human-readable label
    pub label: String,
    /// What the column holds
    pub slot: ColumnSlot,
}

impl From<ColumnSlot> for Column {
    fn from(slot: ColumnSlot) -> Self {
        Self {
            name: slot.variable_name(),
            label: slot.label(),
            slot,
        }
    }
}

/// The ordered output layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedcapSchema {
    version: &'static str,
    columns: Vec<Column>,
}

impl RedcapSchema {
    /// Build the layout from the slot bounds. Pure; every call is identical.
    #[must_use]
    pub fn build() -> Self {
        let mut slots = vec![
            ColumnSlot::PatientId,
            ColumnSlot::HasGermline,
            ColumnSlot::GeneCount,
        ];
        for germline in MINIMUM_GERMLINES..=MAXIMUM_GERMLINES {
            slots.push(ColumnSlot::Gene { germline });
            slots.push(ColumnSlot::VariantCount { germline });
            for variant in MINIMUM_VARIANTS..=MAXIMUM_VARIANTS {
                slots.extend(VariantField::ALL.into_iter().map(|field| ColumnSlot::Variant {
                    germline,
                    variant,
                    field,
                }));
            }
        }

        Self {
            version: SCHEMA_VERSION,
            columns: slots.into_iter().map(Column::from).collect(),
        }
    }

    /// The process-wide layout, built on first use
    #[must_use]
    pub fn global() -> &'static Self {
        static SCHEMA: OnceLock<RedcapSchema> = OnceLock::new();
        SCHEMA.get_or_init(Self::build)
    }

    /// Version tag
    #[must_use]
    pub const fn version(&self) -> &'static str {
        self.version
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether there are no columns
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Variable names in order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Header row for the requested style
    #[must_use]
    pub fn headers(&self, style: HeaderStyle) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| match style {
                HeaderStyle::VariableNames => c.name.as_str(),
                HeaderStyle::Labels => c.label.as_str(),
            })
            .collect()
    }

    /// Position of a slot
    #[must_use]
    pub fn index_of(&self, slot: ColumnSlot) -> Option<usize> {
        self.columns.iter().position(|c| c.slot == slot)
    }

    /// Position of a variable name
    #[must_use]
    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

impl fmt::Display for RedcapSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} columns)", self.version, self.columns.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_width_matches_constants() {
        let schema = RedcapSchema::build();
        assert_eq!(schema.len(), COLUMN_COUNT);
        assert_eq!(COLUMN_COUNT, 57);
        assert_eq!(GENE_FRAGMENT_WIDTH, 18);
    }

    #[test]
    fn test_build_is_idempotent() {
        assert_eq!(RedcapSchema::build(), RedcapSchema::build());
        assert_eq!(RedcapSchema::global(), &RedcapSchema::build());
        assert!(std::ptr::eq(RedcapSchema::global(), RedcapSchema::global()));
    }

    #[test]
    fn test_names_are_unique() {
        let schema = RedcapSchema::global();
        let names: HashSet<&str> = schema.names().into_iter().collect();
        assert_eq!(names.len(), schema.len());
    }

    #[test]
    fn test_positions() {
        let schema = RedcapSchema::global();
        assert_eq!(schema.names()[..3], ["patient_id", "sum_germ", "sum_germ_num_gen"]);
        assert_eq!(schema.index_of_name("sum_germ_gene_1"), Some(3));
        assert_eq!(schema.index_of_name("sum_germ_var1_cdna_1"), Some(5));
        assert_eq!(schema.index_of_name("sum_germ_gene_2"), Some(3 + GENE_FRAGMENT_WIDTH));
        assert_eq!(
            schema.index_of(ColumnSlot::Variant {
                germline: 3,
                variant: 4,
                field: VariantField::Comment,
            }),
            Some(COLUMN_COUNT - 1)
        );
    }

    #[test]
    fn test_labels() {
        let schema = RedcapSchema::global();
        let labels = schema.headers(HeaderStyle::Labels);
        assert_eq!(labels[0], "Subject ID:");
        assert_eq!(labels[5], "Germline variant 1/maternal allele variant (cDNA) [1]:");
        assert_eq!(labels[9], "Germline variant 2/paternal allele variant (cDNA) [1]:");
        assert_eq!(labels[13], "Germline variant 3 (cDNA) [1]:");
    }
}
