//! Load-time catalog checks.
//!
//! Findings are advisory. Resolution always runs against whatever index was
//! built, so a finding here explains odd prices later rather than blocking
//! the load.

use crate::index::{normalize, style_key, DimKey, ExactKey, KeyPart};
use crate::model::{PricingRow, ProductCategory, WidthRange, WidthSpec};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Neighbouring brackets further apart than this leave widths unpriced.
pub const BRACKET_GAP_TOLERANCE: f64 = 0.1 + 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    DuplicateKey,
    DuplicateSku,
    InvertedRange,
    OverlappingRanges,
    RangeGap,
    ColourCoverageHole,
    NonPositivePrice,
    RangeOnFixedCategory,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DuplicateKey => "duplicate_key",
            Self::DuplicateSku => "duplicate_sku",
            Self::InvertedRange => "inverted_range",
            Self::OverlappingRanges => "overlapping_ranges",
            Self::RangeGap => "range_gap",
            Self::ColourCoverageHole => "colour_coverage_hole",
            Self::NonPositivePrice => "non_positive_price",
            Self::RangeOnFixedCategory => "range_on_fixed_category",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFinding {
    pub kind: FindingKind,
    /// SKUs of the rows involved.
    pub skus: Vec<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn of_kind(&self, kind: FindingKind) -> impl Iterator<Item = &ValidationFinding> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }

    fn push(&mut self, kind: FindingKind, skus: Vec<String>, message: String) {
        self.findings.push(ValidationFinding {
            kind,
            skus,
            message,
        });
    }
}

/// Runs every check over `rows`. Findings come out grouped by check, each
/// group in catalog order.
pub fn validate_catalog(rows: &[PricingRow]) -> ValidationReport {
    let mut report = ValidationReport::default();
    check_rows(rows, &mut report);
    check_duplicate_keys(rows, &mut report);
    check_duplicate_skus(rows, &mut report);
    check_brackets(rows, &mut report);
    check_colour_coverage(rows, &mut report);
    report
}

fn check_rows(rows: &[PricingRow], report: &mut ValidationReport) {
    for row in rows {
        if !(row.unit_price.is_finite() && row.unit_price > 0.0) {
            report.push(
                FindingKind::NonPositivePrice,
                vec![row.sku.clone()],
                format!("{} has price {}", row.sku, row.unit_price),
            );
        }
        if let Some(WidthSpec::Range(range)) = row.width {
            if row.category != ProductCategory::SlidingGate {
                report.push(
                    FindingKind::RangeOnFixedCategory,
                    vec![row.sku.clone()],
                    format!("{} is a {} priced by width bracket", row.sku, row.category),
                );
            }
            if range.min > range.max {
                report.push(
                    FindingKind::InvertedRange,
                    vec![row.sku.clone()],
                    format!("{} has bracket {} with min above max", row.sku, range),
                );
            }
        }
    }
}

fn check_duplicate_keys(rows: &[PricingRow], report: &mut ValidationReport) {
    let mut seen: HashMap<ExactKey, &str> = HashMap::new();
    for row in rows {
        let Some(key) = ExactKey::for_row(row) else {
            continue;
        };
        match seen.get(&key) {
            Some(first) => report.push(
                FindingKind::DuplicateKey,
                vec![first.to_string(), row.sku.clone()],
                format!("{} shadows {} for the same selection", row.sku, first),
            ),
            None => {
                seen.insert(key, &row.sku);
            }
        }
    }
}

fn check_duplicate_skus(rows: &[PricingRow], report: &mut ValidationReport) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        let key = row.sku.trim().to_uppercase();
        match seen.get(&key) {
            Some(&first) => report.push(
                FindingKind::DuplicateSku,
                vec![rows[first].sku.clone(), row.sku.clone()],
                format!("SKU {} is listed more than once", row.sku),
            ),
            None => {
                seen.insert(key, i);
            }
        }
    }
}

type BracketGroup = (String, String, Option<DimKey>, KeyPart<String>);

fn check_brackets(rows: &[PricingRow], report: &mut ValidationReport) {
    let mut order: Vec<BracketGroup> = Vec::new();
    let mut groups: HashMap<BracketGroup, Vec<(WidthRange, &str)>> = HashMap::new();

    for row in rows {
        if row.category != ProductCategory::SlidingGate {
            continue;
        }
        let Some(range) = row.width.and_then(|w| w.as_range()) else {
            continue;
        };
        if range.min > range.max {
            continue;
        }
        let colour = match row.colour.as_deref().map(normalize) {
            Some(c) if !c.is_empty() => KeyPart::Exact(c),
            _ => KeyPart::Wildcard,
        };
        let group = (
            normalize(&row.product_type),
            style_key(row.category, &row.style),
            DimKey::from_f64(row.height),
            colour,
        );
        if !groups.contains_key(&group) {
            order.push(group.clone());
        }
        groups.entry(group).or_default().push((range, row.sku.as_str()));
    }

    for group in &order {
        let Some(brackets) = groups.get_mut(group) else {
            continue;
        };
        brackets.sort_by(|a, b| a.0.min.total_cmp(&b.0.min));
        for pair in brackets.windows(2) {
            let (prev, prev_sku) = pair[0];
            let (next, next_sku) = pair[1];
            let skus = vec![prev_sku.to_string(), next_sku.to_string()];
            if next.min <= prev.max {
                report.push(
                    FindingKind::OverlappingRanges,
                    skus,
                    format!("brackets {} and {} overlap", prev, next),
                );
            } else if next.min - prev.max > BRACKET_GAP_TOLERANCE {
                report.push(
                    FindingKind::RangeGap,
                    skus,
                    format!("widths between {} and {} are not priced", prev, next),
                );
            }
        }
    }
}

type CoverageGroup = (ProductCategory, String, String);

/// A product offered in some colour at one height but not another leaves a
/// hole in its colour coverage.
fn check_colour_coverage(rows: &[PricingRow], report: &mut ValidationReport) {
    let mut order: Vec<CoverageGroup> = Vec::new();
    // colours per height, and whether that height has an any-colour row
    let mut groups: HashMap<CoverageGroup, Vec<(Option<DimKey>, BTreeSet<String>, bool, Vec<&str>)>> =
        HashMap::new();

    for row in rows {
        let group = (
            row.category,
            normalize(&row.product_type),
            style_key(row.category, &row.style),
        );
        if !groups.contains_key(&group) {
            order.push(group.clone());
        }
        let heights = groups.entry(group).or_default();
        let height = DimKey::from_f64(row.height);
        let slot = match heights.iter().position(|h| h.0 == height) {
            Some(i) => i,
            None => {
                heights.push((height, BTreeSet::new(), false, Vec::new()));
                heights.len() - 1
            }
        };
        let entry = &mut heights[slot];
        entry.3.push(row.sku.as_str());
        match row.colour.as_deref().map(normalize) {
            Some(c) if !c.is_empty() => {
                entry.1.insert(c);
            }
            _ => entry.2 = true,
        }
    }

    for group in &order {
        let Some(heights) = groups.get(group) else {
            continue;
        };
        let all_colours: BTreeSet<&String> = heights.iter().flat_map(|h| h.1.iter()).collect();
        for (height, colours, any_colour, skus) in heights {
            if *any_colour {
                continue;
            }
            let missing: Vec<&str> = all_colours
                .iter()
                .filter(|c| !colours.contains(c.as_str()))
                .map(|c| c.as_str())
                .collect();
            if missing.is_empty() {
                continue;
            }
            let height = height
                .map(|h| fenceplan_core::format_dimension(h.thousandths() as f64 / 1000.0))
                .unwrap_or_else(|| "?".to_string());
            report.push(
                FindingKind::ColourCoverageHole,
                skus.iter().map(|s| s.to_string()).collect(),
                format!(
                    "{} {} {} at height {} is not offered in {}",
                    group.0,
                    group.1,
                    group.2,
                    height,
                    missing.join(", ")
                ),
            );
        }
    }
}
