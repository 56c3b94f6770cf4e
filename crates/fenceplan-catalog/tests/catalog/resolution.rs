use crate::fixture::{catalog, panel, post, sliding};
use fenceplan_catalog::{
    Catalog, IndexedResolver, MatchKind, ProductCategory, ProductSelection, ResolutionErrorKind,
    Resolver, WidthRange,
};

#[test]
fn test_panel_by_generated_sku() {
    let resolved = catalog().resolve(&panel("Surfmist").with_width(2.39)).unwrap();
    assert_eq!(resolved.sku, "PANEL-SLAT-HORIZONTAL-SURFMIST-1.8-2.39");
    assert_eq!(resolved.unit_price, 185.0);
    assert_eq!(resolved.matched_by, MatchKind::Sku);
    assert!(!resolved.width_snapped);
}

#[test]
fn test_panel_falls_back_to_any_colour_row() {
    let resolved = catalog().resolve(&panel("Monument")).unwrap();
    assert_eq!(resolved.sku, "SLAT-H-ANY");
    assert_eq!(resolved.matched_by, MatchKind::AnyColour);
}

#[test]
fn test_post_styles_share_bucket_except_named_ones() {
    let catalog = catalog();
    assert_eq!(
        catalog.resolve(&post("Colonial")).unwrap().sku,
        "POST-STEEL-PICKET-BLACK-2.4"
    );
    assert_eq!(
        catalog.resolve(&post("Blade")).unwrap().sku,
        "POST-STEEL-BLADE-BLACK-2.4"
    );
}

#[test]
fn test_sliding_bracket_upper_bound_is_inclusive() {
    let resolved = catalog().resolve(&sliding("Black", 1.8, 5.0)).unwrap();
    assert_eq!(resolved.sku, "SGATE-SLIDING-PICKET-BLACK-1.8-4.3to5");
    assert_eq!(resolved.priced_width, Some(5.0));
    assert_eq!(resolved.requested_width, Some(5.0));
    assert!(!resolved.width_snapped);

    let lower = catalog().resolve(&sliding("Black", 1.8, 3.6)).unwrap();
    assert_eq!(lower.unit_price, 1100.0);
}

#[test]
fn test_sliding_priced_at_bracket_max() {
    let resolved = catalog().resolve(&sliding("Black", 1.8, 3.9)).unwrap();
    assert_eq!(resolved.unit_price, 1250.0);
    assert_eq!(resolved.priced_width, Some(4.2));
    assert!(resolved.width_snapped);
}

#[test]
fn test_exact_colour_preferred_over_any_colour() {
    let resolved = catalog().resolve(&sliding("Black", 2.1, 3.5)).unwrap();
    assert_eq!(resolved.sku, "SGATE-SLIDING-PICKET-BLACK-2.1-3to4");
    assert_eq!(resolved.unit_price, 1200.0);

    let other = catalog().resolve(&sliding("Monument", 2.1, 3.5)).unwrap();
    assert_eq!(other.sku, "SG-ANY-2.1");
    assert_eq!(other.matched_by, MatchKind::SlidingBracket);
}

#[test]
fn test_sliding_failure_lists_every_bracket() {
    let err = catalog().resolve(&sliding("White", 1.8, 4.8)).unwrap_err();
    assert_eq!(err.kind, ResolutionErrorKind::MissingSku);
    assert_eq!(
        err.width_ranges,
        vec![
            WidthRange::new(3.1, 3.6),
            WidthRange::new(3.7, 4.2),
            WidthRange::new(4.3, 5.0),
        ]
    );
    assert_eq!(err.selection.width, Some(4.8));
}

#[test]
fn test_width_between_brackets_is_missing() {
    let err = catalog().resolve(&sliding("Black", 1.8, 3.65)).unwrap_err();
    assert_eq!(err.kind, ResolutionErrorKind::MissingSku);
    assert_eq!(err.width_ranges.len(), 3);
}

#[test]
fn test_gate_without_width_is_invalid_input() {
    let selection = ProductSelection::new(ProductCategory::Gate, "Single", "Picket")
        .with_colour("White")
        .with_height(1.2);
    let err = catalog().resolve(&selection).unwrap_err();
    assert_eq!(err.kind, ResolutionErrorKind::InvalidInput);
    assert!(err.message.contains("width"));
}

#[test]
fn test_untokenizable_type_fails_sku_build() {
    let selection = ProductSelection::new(ProductCategory::Gate, "///", "Picket")
        .with_height(1.2)
        .with_width(0.9);
    let err = catalog().resolve(&selection).unwrap_err();
    assert_eq!(err.kind, ResolutionErrorKind::SkuBuildFailed);
}

#[test]
fn test_miss_reports_generated_sku_and_near_misses() {
    let selection = ProductSelection::new(ProductCategory::Gate, "Single", "Picket")
        .with_colour("White")
        .with_height(1.2)
        .with_width(1.0);
    let err = catalog().resolve(&selection).unwrap_err();
    assert_eq!(err.kind, ResolutionErrorKind::MissingSku);
    assert_eq!(err.generated_sku.as_deref(), Some("GATE-SINGLE-PICKET-WHITE-1.2-1"));
    assert_eq!(err.near_misses[0], "GATE-SINGLE-PICKET-WHITE-1.2-0.9");
    assert!(err.near_misses.len() <= 5);
}

#[test]
fn test_custom_chain_without_sku_lookup() {
    let catalog = catalog();
    let resolver = Resolver::with_strategies(catalog.index(), vec![Box::new(IndexedResolver)]);
    assert_eq!(resolver.strategy_names(), vec!["indexed"]);

    let resolved = resolver.resolve(&post("Picket")).unwrap();
    assert_eq!(resolved.matched_by, MatchKind::Exact);
    assert_eq!(resolved.sku, "POST-STEEL-PICKET-BLACK-2.4");
}

#[test]
fn test_resolution_is_repeatable() {
    let catalog = catalog();
    let selection = sliding("Black", 1.8, 4.0);
    assert_eq!(catalog.resolve(&selection), catalog.resolve(&selection));
}

#[test]
fn test_any_width_row_prices_a_sized_panel() {
    let catalog = Catalog::from_json_str(
        r#"[{"category": "panel", "type": "Slat", "style": "Horizontal", "colour": "Surfmist",
             "height": 1.8, "width": null, "sku": "SLAT-SURFMIST-1.8", "unitPrice": 160.0}]"#,
    )
    .unwrap();
    let resolved = catalog.resolve(&panel("Surfmist").with_width(2.39)).unwrap();
    assert_eq!(resolved.sku, "SLAT-SURFMIST-1.8");
    assert_eq!(resolved.matched_by, MatchKind::AnyWidth);
    assert_eq!(resolved.priced_width, Some(2.39));
}

#[test]
fn test_any_colour_any_width_row_is_last_resort() {
    // the fixture's SLAT-H-ANY row has neither colour nor width
    let resolved = catalog().resolve(&panel("Monument").with_width(2.39)).unwrap();
    assert_eq!(resolved.sku, "SLAT-H-ANY");
    assert_eq!(resolved.matched_by, MatchKind::AnyColour);
}

#[test]
fn test_exact_colour_beats_any_colour_at_same_key() {
    let catalog = Catalog::from_json_str(
        r#"[{"category": "gate", "type": "Single", "style": "Picket", "colour": null,
             "height": 1.2, "width": 0.9, "sku": "GATE-ANY", "unitPrice": 300.0},
            {"category": "gate", "type": "Single", "style": "Picket", "colour": "White",
             "height": 1.2, "width": 0.9, "sku": "GATE-WHITE", "unitPrice": 320.0}]"#,
    )
    .unwrap();
    let resolver = Resolver::with_strategies(catalog.index(), vec![Box::new(IndexedResolver)]);
    let white = ProductSelection::new(ProductCategory::Gate, "Single", "Picket")
        .with_colour("White")
        .with_height(1.2)
        .with_width(0.9);

    let resolved = resolver.resolve(&white).unwrap();
    assert_eq!(resolved.sku, "GATE-WHITE");
    assert_eq!(resolved.matched_by, MatchKind::Exact);

    let black = white.clone().with_colour("Black");
    let fallback = resolver.resolve(&black).unwrap();
    assert_eq!(fallback.sku, "GATE-ANY");
    assert_eq!(fallback.matched_by, MatchKind::AnyColour);
}
