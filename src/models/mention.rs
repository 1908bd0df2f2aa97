//! Raw mention rows as produced by the text-mining extraction step.

use serde::Deserialize;

/// Default marker the extraction step writes for a value it could not find
pub const UNKNOWN_SENTINEL: &str = "__UNK__";

/// Columns the input table must provide
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Filename",
    "Section",
    "Sentence",
    "Gene",
    "Syntax_N",
    "Syntax_P",
    "Type",
    "Vaf",
    "Specimen_Collection_Date",
    "Sample_Source",
];

/// One gene/variant mention in one source document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawMentionRow {
    /// Source document filename (carries MRN and report date)
    #[serde(rename = "Filename")]
    pub filename: String,
    /// Document section label
    #[serde(rename = "Section")]
    pub section: Option<String>,
    /// Sentence the mention was found in
    #[serde(rename = "Sentence")]
    pub sentence: Option<String>,
    /// Gene symbol
    #[serde(rename = "Gene")]
    pub gene: Option<String>,
    /// Nucleotide (cDNA) syntax
    #[serde(rename = "Syntax_N")]
    pub syntax_n: Option<String>,
    /// Protein syntax
    #[serde(rename = "Syntax_P")]
    pub syntax_p: Option<String>,
    /// Variant type / clinical significance free text
    #[serde(rename = "Type")]
    pub variant_type: Option<String>,
    /// Variant allele frequency or zygosity free text
    #[serde(rename = "Vaf")]
    pub vaf: Option<String>,
    /// Specimen collection date as written in the document
    #[serde(rename = "Specimen_Collection_Date")]
    pub specimen_collection_date: Option<String>,
    /// Sample source (blood, bone marrow, ...)
    #[serde(rename = "Sample_Source")]
    pub sample_source: Option<String>,
}

impl RawMentionRow {
    /// Treat empty cells and the unknown sentinel as absent.
    #[must_use]
    pub fn mask_unknown(mut self, sentinel: &str) -> Self {
        for field in [
            &mut self.section,
            &mut self.sentence,
            &mut self.gene,
            &mut self.syntax_n,
            &mut self.syntax_p,
            &mut self.variant_type,
            &mut self.vaf,
            &mut self.specimen_collection_date,
            &mut self.sample_source,
        ] {
            if field
                .as_deref()
                .is_some_and(|value| value.is_empty() || value == sentinel)
            {
                *field = None;
            }
        }
        if self.filename == sentinel {
            self.filename.clear();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_unknown() {
        let row = RawMentionRow {
            filename: "ocr_1-a-01_01_2020".to_string(),
            gene: Some("ELANE".to_string()),
            syntax_n: Some(UNKNOWN_SENTINEL.to_string()),
            sample_source: Some(String::new()),
            vaf: Some("heterozygous".to_string()),
            ..Default::default()
        }
        .mask_unknown(UNKNOWN_SENTINEL);

        assert_eq!(row.gene.as_deref(), Some("ELANE"));
        assert_eq!(row.syntax_n, None);
        assert_eq!(row.sample_source, None);
        assert_eq!(row.vaf.as_deref(), Some("heterozygous"));
    }
}
