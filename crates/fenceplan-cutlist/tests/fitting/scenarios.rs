use fenceplan_cutlist::{
    count_boards_purchased, fit_panels, Leftover, LeftoverPool, PanelFitConfig,
};

fn lengths(result: &fenceplan_cutlist::PanelFitResult) -> Vec<f64> {
    result.segments.iter().map(|s| s.length).collect()
}

#[test]
fn test_5000_run_without_leftovers() {
    let mut pool = LeftoverPool::new();
    let result = fit_panels("run-1", 5000.0, false, &mut pool, &PanelFitConfig::default());

    assert_eq!(lengths(&result), vec![2390.0, 2390.0, 220.0]);
    assert!(result.segments[2].is_remainder);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("even spacing"));

    assert_eq!(result.new_leftovers.len(), 1);
    assert_eq!(result.new_leftovers[0].id, "lo-1");
    assert_eq!(result.new_leftovers[0].length, 1870.0);
    assert_eq!(count_boards_purchased(&result.segments), 3);
    assert_eq!(result.panel_positions, vec![0.0, 2390.0, 4780.0, 5000.0]);

    assert_eq!(pool.len(), 1);
    assert!(!pool.all()[0].consumed);
}

#[test]
fn test_remainder_cut_from_largest_leftover() {
    let mut pool = LeftoverPool::from_leftovers(vec![
        Leftover::new("a", 1000.0),
        Leftover::new("b", 2000.0),
    ]);
    let result = fit_panels("run-1", 3000.0, false, &mut pool, &PanelFitConfig::default());

    let remainder = &result.segments[1];
    assert_eq!(remainder.length, 610.0);
    assert_eq!(remainder.uses_leftover_id.as_deref(), Some("b"));
    assert!(pool.get("b").unwrap().consumed);
    assert!(!pool.get("a").unwrap().consumed);

    // 2000 - 610 - 300
    assert_eq!(result.new_leftovers.len(), 1);
    assert_eq!(result.new_leftovers[0].length, 1090.0);
    assert_eq!(count_boards_purchased(&result.segments), 1);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_leftover_too_short_falls_back_to_fresh_panel() {
    let mut pool = LeftoverPool::from_leftovers(vec![Leftover::new("short", 800.0)]);
    let result = fit_panels("run-1", 3000.0, false, &mut pool, &PanelFitConfig::default());

    assert!(result.segments[1].uses_leftover_id.is_none());
    assert!(!pool.get("short").unwrap().consumed);
    assert_eq!(result.new_leftovers[0].length, 1480.0);
    assert_eq!(count_boards_purchased(&result.segments), 2);
}

#[test]
fn test_small_waste_is_not_kept() {
    let mut pool = LeftoverPool::new();
    let result = fit_panels("run-1", 4390.0, false, &mut pool, &PanelFitConfig::default());
    assert_eq!(lengths(&result), vec![2390.0, 2000.0]);
    assert!(result.new_leftovers.is_empty());
    assert!(pool.is_empty());
}

#[test]
fn test_even_spacing_cuts_every_segment() {
    let mut pool = LeftoverPool::new();
    let result = fit_panels("run-1", 5000.0, true, &mut pool, &PanelFitConfig::default());

    assert_eq!(result.segments.len(), 3);
    for segment in &result.segments {
        assert!((segment.length - 5000.0 / 3.0).abs() < 1e-9);
        assert!(!segment.is_remainder);
    }
    assert_eq!(*result.panel_positions.last().unwrap(), 5000.0);
    assert!(result.warnings.is_empty());

    // each fresh cut leaves 2390 - 1666.67 - 300
    assert_eq!(result.new_leftovers.len(), 3);
    assert!((result.new_leftovers[0].length - (2390.0 - 5000.0 / 3.0 - 300.0)).abs() < 1e-9);
    assert_eq!(count_boards_purchased(&result.segments), 3);
}

#[test]
fn test_even_spacing_uses_leftovers_in_order() {
    let mut pool = LeftoverPool::from_leftovers(vec![Leftover::new("lo-x", 2300.0)]);
    let result = fit_panels("run-1", 5000.0, true, &mut pool, &PanelFitConfig::default());

    assert_eq!(result.segments[0].uses_leftover_id.as_deref(), Some("lo-x"));
    assert!(result.segments[1].uses_leftover_id.is_none());
    assert_eq!(result.new_leftovers[0].id, "lo-1");
    assert!((result.new_leftovers[0].length - (2300.0 - 5000.0 / 3.0 - 300.0)).abs() < 1e-9);
    assert_eq!(count_boards_purchased(&result.segments), 2);
}

#[test]
fn test_even_spacing_exact_multiple_needs_no_cuts() {
    let mut pool = LeftoverPool::new();
    let result = fit_panels("run-1", 4780.0, true, &mut pool, &PanelFitConfig::default());
    assert_eq!(lengths(&result), vec![2390.0, 2390.0]);
    assert!(pool.is_empty());
}

#[test]
fn test_runaway_run_is_rejected() {
    let mut pool = LeftoverPool::from_leftovers(vec![Leftover::new("a", 2000.0)]);
    let result = fit_panels("run-1", 2_000_000.0, false, &mut pool, &PanelFitConfig::default());

    assert!(result.segments.is_empty());
    assert!(result.panel_positions.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("500"));
    assert!(!pool.get("a").unwrap().consumed);
}

#[test]
fn test_invalid_lengths_are_rejected() {
    let config = PanelFitConfig::default();
    for length in [0.0, -10.0, f64::NAN, f64::INFINITY] {
        let result = fit_panels("run-1", length, false, &mut LeftoverPool::new(), &config);
        assert!(result.segments.is_empty());
        assert_eq!(result.warnings.len(), 1);
    }
}

#[test]
fn test_result_serializes_camel_case() {
    let mut pool = LeftoverPool::from_leftovers(vec![Leftover::new("a", 2000.0)]);
    let result = fit_panels("run-1", 3000.0, false, &mut pool, &PanelFitConfig::default());
    let json = serde_json::to_value(&result).unwrap();
    assert!(json["panelPositions"].is_array());
    assert_eq!(json["segments"][1]["usesLeftoverId"], "a");
    assert_eq!(json["segments"][1]["isRemainder"], true);
    assert!(json["segments"][0].get("usesLeftoverId").is_none());
}
