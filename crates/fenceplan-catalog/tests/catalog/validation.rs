use fenceplan_catalog::{validate_catalog, Catalog, FindingKind, PricingRow};

fn rows(json: &str) -> Vec<PricingRow> {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_bracket_overlap_and_gap() {
    let rows = rows(
        r#"[
        {"category": "sliding_gate", "type": "Sliding", "style": "Picket", "colour": "Black",
         "height": 1.8, "width": {"min": 3.0, "max": 3.6}, "sku": "A", "unitPrice": 1.0},
        {"category": "sliding_gate", "type": "Sliding", "style": "Picket", "colour": "Black",
         "height": 1.8, "width": {"min": 3.5, "max": 4.0}, "sku": "B", "unitPrice": 1.0},
        {"category": "sliding_gate", "type": "Sliding", "style": "Picket", "colour": "Black",
         "height": 1.8, "width": {"min": 4.5, "max": 5.0}, "sku": "C", "unitPrice": 1.0}
    ]"#,
    );
    let report = validate_catalog(&rows);
    assert_eq!(report.of_kind(FindingKind::OverlappingRanges).count(), 1);
    let gap = report.of_kind(FindingKind::RangeGap).next().unwrap();
    assert_eq!(gap.skus, vec!["B".to_string(), "C".to_string()]);
}

#[test]
fn test_inverted_and_misplaced_ranges() {
    let rows = rows(
        r#"[
        {"category": "sliding_gate", "type": "Sliding", "style": "Picket",
         "height": 1.8, "width": {"min": 4.0, "max": 3.0}, "sku": "INV", "unitPrice": 1.0},
        {"category": "panel", "type": "Slat", "style": "Horizontal",
         "height": 1.8, "width": {"min": 1.0, "max": 2.0}, "sku": "PNL", "unitPrice": 1.0}
    ]"#,
    );
    let report = validate_catalog(&rows);
    assert_eq!(report.of_kind(FindingKind::InvertedRange).count(), 1);
    assert_eq!(report.of_kind(FindingKind::RangeOnFixedCategory).count(), 1);
}

#[test]
fn test_findings_do_not_block_resolution() {
    let json = r#"[
        {"category": "post", "type": "Steel", "style": "Picket", "colour": "Black",
         "height": 2.4, "sku": "POST-STEEL-PICKET-BLACK-2.4", "unitPrice": 45.0},
        {"category": "post", "type": "Steel", "style": "Picket", "colour": "Black",
         "height": 2.4, "sku": "POST-STEEL-PICKET-BLACK-2.4", "unitPrice": 99.0}
    ]"#;
    let catalog = Catalog::from_json_str(json).unwrap();
    assert_eq!(catalog.report().of_kind(FindingKind::DuplicateSku).count(), 1);
    assert_eq!(catalog.report().of_kind(FindingKind::DuplicateKey).count(), 1);

    let selection = crate::fixture::post("Picket");
    assert_eq!(catalog.resolve(&selection).unwrap().unit_price, 45.0);
}
