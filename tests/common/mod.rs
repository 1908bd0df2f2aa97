//! Shared fixtures for integration tests

#![allow(dead_code)]

use scnir_redcap::RawMentionRow;

/// Header line of a raw mention table
pub const HEADER: &str = "Filename\tSection\tSentence\tGene\tSyntax_N\tSyntax_P\tType\tVaf\tSpecimen_Collection_Date\tSample_Source";

/// A mention row with the identity fields set and everything else absent
#[must_use]
pub fn mention(
    filename: &str,
    gene: &str,
    syntax_n: &str,
    variant_type: Option<&str>,
) -> RawMentionRow {
    RawMentionRow {
        filename: filename.to_string(),
        section: Some("Results".to_string()),
        sentence: Some(format!("{gene} {syntax_n} detected")),
        gene: Some(gene.to_string()),
        syntax_n: Some(syntax_n.to_string()),
        variant_type: variant_type.map(str::to_string),
        ..Default::default()
    }
}

/// Build a tab-separated table from header plus rows of fields
#[must_use]
pub fn tsv(rows: &[[&str; 10]]) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(&row.join("\t"));
        text.push('\n');
    }
    text
}
