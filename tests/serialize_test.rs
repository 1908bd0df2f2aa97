use std::collections::BTreeSet;

use scnir_redcap::schema::{COLUMN_COUNT, ColumnSlot, VariantField};
use scnir_redcap::{
    Cell, DegradationKind, Diagnostics, GeneMention, PatientForm, PatientId, RedcapSchema,
    RowSerializer, Variant, VariantClassifier, VariantKey,
};

fn variant(gene: &str, syntax_n: &str) -> Variant {
    Variant::new(
        Some(gene.to_string()),
        VariantKey::new(Some(syntax_n), Some("p.X1Y"), Some("Pathogenic"), None),
        BTreeSet::new(),
        BTreeSet::new(),
        BTreeSet::new(),
    )
}

fn gene(symbol: &str, variants: usize) -> GeneMention {
    GeneMention::new(
        Some(symbol.to_string()),
        (1..=variants)
            .map(|i| variant(symbol, &format!("c.{i}A>G")))
            .collect(),
    )
}

fn cell_at(row: &[Cell], slot: ColumnSlot) -> &Cell {
    &row[RedcapSchema::global().index_of(slot).unwrap()]
}

#[test]
fn test_row_width_for_empty_and_full_forms() {
    let diagnostics = Diagnostics::new();
    let classifier = VariantClassifier::new();
    let serializer = RowSerializer::new(&classifier, &diagnostics);

    let empty = PatientForm::new(PatientId::Mrn(1), Vec::new());
    let full = PatientForm::new(
        PatientId::Mrn(2),
        vec![gene("ELANE", 4), gene("HAX1", 4), gene("SBDS", 4)],
    );

    for form in [&empty, &full] {
        assert_eq!(serializer.serialize(form).len(), RedcapSchema::global().len());
        assert_eq!(serializer.serialize(form).len(), COLUMN_COUNT);
    }

    let row = serializer.serialize(&empty);
    assert_eq!(row[1], Cell::Integer(1));
    assert_eq!(row[2], Cell::Integer(0));
    assert!(row[3..].iter().all(Cell::is_blank));

    let row = serializer.serialize(&full);
    assert!(row.iter().all(|cell| !cell.is_blank()));
    assert!(diagnostics.is_empty());
}

#[test]
fn test_gene_overflow_truncates() {
    let diagnostics = Diagnostics::new();
    let classifier = VariantClassifier::new();
    let serializer = RowSerializer::new(&classifier, &diagnostics);

    let form = PatientForm::new(
        PatientId::Mrn(3),
        vec![
            gene("WAS", 1),
            gene("CSF3R", 1),
            gene("ELANE", 1),
            gene("SBDS", 1),
            gene("HAX1", 1),
        ],
    );
    let row = serializer.serialize(&form);

    assert_eq!(row.len(), COLUMN_COUNT);
    assert_eq!(cell_at(&row, ColumnSlot::GeneCount), &Cell::Integer(3));

    let genes: Vec<&Cell> = (1..=3)
        .map(|germline| cell_at(&row, ColumnSlot::Gene { germline }))
        .collect();
    assert_eq!(
        genes,
        vec![
            &Cell::Text("CSF3R".to_string()),
            &Cell::Text("ELANE".to_string()),
            &Cell::Text("HAX1".to_string()),
        ]
    );
    for dropped in ["SBDS", "WAS"] {
        assert!(
            row.iter().all(|cell| !cell.to_string().contains(dropped)),
            "{dropped} leaked into the row"
        );
    }

    let overflow = diagnostics.of_kind(DegradationKind::GeneOverflow);
    assert_eq!(overflow.len(), 1);
    assert!(overflow[0].input.contains("SBDS"));
    assert!(overflow[0].input.contains("WAS"));
}

#[test]
fn test_variant_overflow_truncates() {
    let diagnostics = Diagnostics::new();
    let classifier = VariantClassifier::new();
    let serializer = RowSerializer::new(&classifier, &diagnostics);

    let form = PatientForm::new(PatientId::Mrn(4), vec![gene("ELANE", 6)]);
    let row = serializer.serialize(&form);

    assert_eq!(cell_at(&row, ColumnSlot::VariantCount { germline: 1 }), &Cell::Integer(4));
    let cdna: Vec<String> = (1..=4)
        .map(|variant| {
            cell_at(
                &row,
                ColumnSlot::Variant {
                    germline: 1,
                    variant,
                    field: VariantField::Cdna,
                },
            )
            .to_string()
        })
        .collect();
    assert_eq!(cdna, ["c.1A>G", "c.2A>G", "c.3A>G", "c.4A>G"]);
    assert!(row.iter().all(|cell| !cell.to_string().contains("c.5A>G")));
    assert_eq!(diagnostics.count(DegradationKind::VariantOverflow), 1);
}

#[test]
fn test_slot_order_is_stable() {
    let diagnostics = Diagnostics::new();
    let classifier = VariantClassifier::new();
    let serializer = RowSerializer::new(&classifier, &diagnostics);

    let forward = PatientForm::new(PatientId::Mrn(5), vec![gene("SBDS", 3), gene("ELANE", 2)]);
    let mut backward = forward.clone();
    backward.gene_mentions.reverse();
    for gene in &mut backward.gene_mentions {
        gene.variants.reverse();
    }

    assert_eq!(serializer.serialize(&forward), serializer.serialize(&backward));
}

#[test]
fn test_unclassified_significance_is_blank() {
    let diagnostics = Diagnostics::new();
    let classifier = VariantClassifier::new();
    let serializer = RowSerializer::new(&classifier, &diagnostics);

    let odd = Variant::new(
        Some("ELANE".to_string()),
        VariantKey::new(Some("c.1A>G"), None, Some("benign and pathogenic"), None),
        BTreeSet::new(),
        BTreeSet::new(),
        BTreeSet::new(),
    );
    let form = PatientForm::new(
        PatientId::Mrn(6),
        vec![GeneMention::new(Some("ELANE".to_string()), vec![odd])],
    );
    let row = serializer.serialize(&form);

    let acmg = ColumnSlot::Variant {
        germline: 1,
        variant: 1,
        field: VariantField::Acmg,
    };
    assert_eq!(cell_at(&row, acmg), &Cell::Blank);
    assert_eq!(diagnostics.count(DegradationKind::UnclassifiedSignificance), 1);
}
