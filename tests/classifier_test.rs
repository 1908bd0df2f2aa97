use scnir_redcap::{
    AcmgClass, DegradationKind, Diagnostics, VariantClassifier, classify_significance,
};

#[test]
fn test_documented_examples() {
    assert_eq!(
        classify_significance("Likely Pathogenic"),
        Some(AcmgClass::LikelyPathogenic)
    );
    assert_eq!(
        classify_significance("Likely pathogenic (somatic)"),
        Some(AcmgClass::LikelyPathogenic)
    );
    assert_eq!(classify_significance("PATHOGENIC  "), Some(AcmgClass::Pathogenic));
    assert_eq!(classify_significance("Benign"), Some(AcmgClass::Benign));
    assert_eq!(
        classify_significance("Variant of uncertain significance"),
        Some(AcmgClass::UncertainSignificance)
    );
    assert_eq!(classify_significance("weird custom text"), None);
}

#[test]
fn test_classifier_is_total() {
    let inputs = [
        "",
        "   ",
        "pathogenic",
        "Pathogenicity unclear",
        "benign/likely benign",
        "likely pathogenic, likely benign",
        "VUS",
        "uncertain benign",
        "\t\nLIKELY\tPATHOGENIC\n",
        "Ünïcödé pathogenic",
        "12345",
    ];
    for input in inputs {
        if let Some(class) = classify_significance(input) {
            assert!((1..=5).contains(&class.ordinal()), "{input}");
        }
    }
}

#[test]
fn test_unmapped_text_reported_once() {
    let diagnostics = Diagnostics::new();
    let classifier = VariantClassifier::new();

    for _ in 0..3 {
        assert_eq!(classifier.classify(Some("weird custom text"), &diagnostics), None);
    }
    assert_eq!(
        classifier.classify(Some("likely benign"), &diagnostics),
        Some(AcmgClass::LikelyBenign)
    );

    let unclassified = diagnostics.of_kind(DegradationKind::UnclassifiedSignificance);
    assert_eq!(unclassified.len(), 1);
    assert_eq!(unclassified[0].input, "weird custom text");
}
