mod common;

use std::collections::BTreeSet;

use common::{mention, tsv};
use scnir_redcap::models::UNKNOWN_SENTINEL;
use scnir_redcap::pipeline::read_raw_table;
use scnir_redcap::{
    DegradationKind, Diagnostics, MentionAggregator, PatientForm, PatientId, RawMentionRow,
    VariantKey,
};

fn aggregate(rows: &[RawMentionRow]) -> Vec<PatientForm> {
    MentionAggregator::new(&Diagnostics::new()).aggregate(rows)
}

#[test]
fn test_grouping_is_repeatable() {
    let rows = vec![
        mention("ocr_3-a-01_02_2019", "SBDS", "c.258+2T>C", Some("Pathogenic")),
        mention("ocr_1-a-01_02_2019", "ELANE", "c.597G>A", None),
        mention("ocr_1-b-03_04_2020", "ELANE", "c.597G>A", None),
        mention("ocr_1-b-03_04_2020", "HAX1", "c.130_131insA", Some("VUS")),
        mention("ocr_3-c-05_06_2021", "SBDS", "c.183_184delinsCT", None),
    ];

    let first = aggregate(&rows);
    let mut reversed = rows.clone();
    reversed.reverse();
    let second = aggregate(&reversed);

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn test_identical_keys_collapse_with_union_of_sources() {
    let mut a = mention("ocr_5-a-01_02_2019", "ELANE", "c.597G>A", Some("Pathogenic"));
    a.sample_source = Some("blood".to_string());
    a.specimen_collection_date = Some("01/01/2019".to_string());
    let mut b = mention("ocr_5-b-02_02_2019", "ELANE", "c.597G>A", Some("Pathogenic"));
    b.sample_source = Some("bone marrow".to_string());
    b.section = Some("Interpretation".to_string());

    let forms = aggregate(&[a, b]);
    assert_eq!(forms.len(), 1);
    let variants = &forms[0].gene_mentions[0].variants;
    assert_eq!(variants.len(), 1);

    let variant = &variants[0];
    let filenames: BTreeSet<&str> = variant
        .text_sources
        .iter()
        .map(|s| s.filename.as_str())
        .collect();
    assert_eq!(
        filenames,
        BTreeSet::from(["ocr_5-a-01_02_2019", "ocr_5-b-02_02_2019"])
    );
    assert_eq!(
        variant.sample_sources,
        BTreeSet::from(["blood".to_string(), "bone marrow".to_string()])
    );
    assert_eq!(variant.specimen_collection_dates.len(), 1);
}

#[test]
fn test_differing_vaf_splits_variant() {
    let mut a = mention("ocr_5-a-01_02_2019", "ELANE", "c.597G>A", None);
    a.vaf = Some("heterozygous".to_string());
    let b = mention("ocr_5-a-01_02_2019", "ELANE", "c.597G>A", None);

    let forms = aggregate(&[a, b]);
    let variants = &forms[0].gene_mentions[0].variants;
    assert_eq!(variants.len(), 2);
    let heterozygous: Vec<Option<bool>> = variants.iter().map(|v| v.heterozygous).collect();
    assert!(heterozygous.contains(&Some(true)));
    assert!(heterozygous.contains(&None));
}

#[test]
fn test_unknown_sentinel_is_absent_and_groups() {
    let input = tsv(&[
        [
            "ocr_9-a-01_02_2019", "Results", "s1", "ELANE", "c.597G>A", UNKNOWN_SENTINEL,
            "Pathogenic", UNKNOWN_SENTINEL, UNKNOWN_SENTINEL, UNKNOWN_SENTINEL,
        ],
        [
            "ocr_9-b-01_03_2019", "Results", "s2", "ELANE", "c.597G>A", UNKNOWN_SENTINEL,
            "Pathogenic", UNKNOWN_SENTINEL, "02/02/2019", "blood",
        ],
        [
            "ocr_9-c-01_04_2019", "Results", "s3", "ELANE", UNKNOWN_SENTINEL, UNKNOWN_SENTINEL,
            "Pathogenic", UNKNOWN_SENTINEL, UNKNOWN_SENTINEL, UNKNOWN_SENTINEL,
        ],
        [
            "ocr_9-d-01_05_2019", "Results", "s4", "ELANE", UNKNOWN_SENTINEL, UNKNOWN_SENTINEL,
            "Pathogenic", UNKNOWN_SENTINEL, UNKNOWN_SENTINEL, UNKNOWN_SENTINEL,
        ],
    ]);
    let rows = read_raw_table(input.as_bytes(), UNKNOWN_SENTINEL).unwrap();
    assert_eq!(rows[0].sample_source, None);

    let forms = aggregate(&rows);
    let variants = &forms[0].gene_mentions[0].variants;
    assert_eq!(variants.len(), 2);

    let known = variants
        .iter()
        .find(|v| v.key == VariantKey::new(Some("c.597G>A"), None, Some("Pathogenic"), None))
        .unwrap();
    assert_eq!(known.text_sources.len(), 2);
    assert_eq!(known.sample_sources, BTreeSet::from(["blood".to_string()]));
    assert!(!known.sample_sources.contains(UNKNOWN_SENTINEL));

    let unknown = variants
        .iter()
        .find(|v| v.syntax_n().is_none())
        .unwrap();
    assert_eq!(unknown.text_sources.len(), 2);
    assert!(unknown.sample_sources.is_empty());
}

#[test]
fn test_malformed_filename_falls_back() {
    let diagnostics = Diagnostics::new();
    let rows = vec![
        mention("no-mrn-here", "ELANE", "c.597G>A", None),
        mention("ocr_12-a-01_01_2020", "ELANE", "c.597G>A", None),
    ];
    let forms = MentionAggregator::new(&diagnostics).aggregate(&rows);

    assert_eq!(forms.len(), 2);
    assert_eq!(forms[0].patient_id, PatientId::Mrn(12));
    assert_eq!(
        forms[1].patient_id,
        PatientId::Unresolved("no-mrn-here".to_string())
    );
    let malformed = diagnostics.of_kind(DegradationKind::MalformedFilename);
    assert_eq!(malformed.len(), 1);
    assert_eq!(malformed[0].input, "no-mrn-here");
}
