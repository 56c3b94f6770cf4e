//! Selection to SKU and price.
//!
//! A `Resolver` runs an ordered chain of strategies. The default chain
//! builds the expected SKU and looks it up, then falls back to the key index.
//! A miss hands over to the next strategy; invalid input and SKU build
//! failures end the chain.

use crate::error::{ResolutionError, ResolutionErrorKind};
use crate::index::{ExactKey, PricingIndex};
use crate::model::{PricingRow, ProductCategory, ProductSelection};
use crate::sku::{bucket_ranges, default_builder_for, find_bracket_row, sku_token, SkuBuildError};
use fenceplan_core::format_dimension;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Largest number of near-miss SKUs reported with a miss.
pub const MAX_NEAR_MISSES: usize = 5;

const WIDTH_EPSILON: f64 = 1e-9;

/// Which lookup found the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Sku,
    Exact,
    /// Exact colour, from a row priced for any width.
    AnyWidth,
    AnyColour,
    SlidingBracket,
}

/// A priced selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolved {
    pub sku: String,
    pub unit_price: f64,
    /// Width the price applies to; the bracket maximum for sliding gates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priced_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_width: Option<f64>,
    /// The priced width differs from the requested one.
    pub width_snapped: bool,
    pub matched_by: MatchKind,
}

impl Resolved {
    fn from_row(row: &PricingRow, selection: &ProductSelection, matched_by: MatchKind) -> Self {
        let requested = selection.width;
        let bracket = row.width.and_then(|w| w.as_range());
        let (priced_width, width_snapped) = match bracket {
            Some(range) if selection.category == ProductCategory::SlidingGate => (
                Some(range.max),
                requested.is_some_and(|w| (range.max - w).abs() > WIDTH_EPSILON),
            ),
            _ => (requested, false),
        };
        Self {
            sku: row.sku.clone(),
            unit_price: row.unit_price,
            priced_width,
            requested_width: requested,
            width_snapped,
            matched_by,
        }
    }
}

/// One way of turning a selection into a catalog row.
pub trait ResolveStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(
        &self,
        selection: &ProductSelection,
        index: &PricingIndex,
    ) -> Result<Resolved, ResolutionError>;
}

/// Builds the expected SKU and looks it up directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkuFirstResolver;

impl ResolveStrategy for SkuFirstResolver {
    fn name(&self) -> &'static str {
        "sku_first"
    }

    fn resolve(
        &self,
        selection: &ProductSelection,
        index: &PricingIndex,
    ) -> Result<Resolved, ResolutionError> {
        let builder = default_builder_for(selection.category);
        let sku = match builder.build(selection, index) {
            Ok(sku) => sku,
            Err(SkuBuildError::NoBracket { width, ranges }) => {
                return Err(no_bracket(selection, width).with_width_ranges(ranges));
            }
            Err(err) => {
                return Err(ResolutionError::new(
                    ResolutionErrorKind::SkuBuildFailed,
                    selection,
                    err.to_string(),
                ));
            }
        };

        match index.by_sku(&sku) {
            Some(row) => Ok(Resolved::from_row(row, selection, MatchKind::Sku)),
            None => Err(ResolutionError::missing(
                selection,
                format!("SKU {} is not in the catalog", sku),
            )
            .with_generated_sku(sku)),
        }
    }
}

/// Looks the selection up by key: exact colour first, then any-colour rows.
/// Within each colour, a row listed at the requested width beats one priced
/// for any width. Sliding gates search their bracket bucket instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedResolver;

impl ResolveStrategy for IndexedResolver {
    fn name(&self) -> &'static str {
        "indexed"
    }

    fn resolve(
        &self,
        selection: &ProductSelection,
        index: &PricingIndex,
    ) -> Result<Resolved, ResolutionError> {
        if selection.category == ProductCategory::SlidingGate {
            return match find_bracket_row(index, selection) {
                Some((_, row)) => Ok(Resolved::from_row(row, selection, MatchKind::SlidingBracket)),
                None => Err(no_bracket(selection, selection.width.unwrap_or_default())
                    .with_width_ranges(bucket_ranges(index, selection))),
            };
        }

        let key = ExactKey::for_selection(selection).ok_or_else(|| {
            ResolutionError::invalid_input(selection, "height and width must be finite numbers")
        })?;

        // colour outranks width: an exact-colour any-width row beats an
        // any-colour row listed at the exact width
        let any_colour = key.with_any_colour();
        let attempts = [
            (key.clone(), MatchKind::Exact),
            (key.with_any_width(), MatchKind::AnyWidth),
            (any_colour.clone(), MatchKind::AnyColour),
            (any_colour.with_any_width(), MatchKind::AnyColour),
        ];
        for (candidate, matched_by) in &attempts {
            if let Some(row) = index.lookup_exact(candidate) {
                return Ok(Resolved::from_row(row, selection, *matched_by));
            }
        }
        Err(ResolutionError::missing(
            selection,
            format!("no catalog row for {}", selection.describe()),
        ))
    }
}

fn no_bracket(selection: &ProductSelection, width: f64) -> ResolutionError {
    let colour = selection
        .colour
        .as_deref()
        .map(|c| format!(" in {}", c))
        .unwrap_or_default();
    ResolutionError::missing(
        selection,
        format!(
            "no sliding gate bracket{} contains width {}",
            colour,
            format_dimension(width)
        ),
    )
}

/// Rejects selections that are missing required fields.
pub fn validate_selection(selection: &ProductSelection) -> Result<(), ResolutionError> {
    let invalid = |message: &str| Err(ResolutionError::invalid_input(selection, message));

    if selection.product_type.trim().is_empty() {
        return invalid("product type is required");
    }
    if selection.style.trim().is_empty() {
        return invalid("style is required");
    }
    match selection.height {
        Some(h) if h.is_finite() && h > 0.0 => {}
        _ => return invalid("height must be a positive number"),
    }
    match selection.width {
        Some(w) if !(w.is_finite() && w > 0.0) => return invalid("width must be a positive number"),
        None if selection.category.is_gate() => return invalid("gate width is required"),
        _ => {}
    }
    Ok(())
}

/// Catalog SKUs sharing the longest prefix with `target`, best first.
pub fn near_misses(index: &PricingIndex, target: &str, limit: usize) -> Vec<String> {
    let target = target.to_uppercase();
    let mut scored: Vec<(usize, usize, &str)> = index
        .skus()
        .enumerate()
        .map(|(i, sku)| (shared_prefix_len(&target, &sku.to_uppercase()), i, sku))
        .filter(|&(shared, _, _)| shared > 0)
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

    let mut out: Vec<String> = Vec::new();
    for (_, _, sku) in scored {
        if out.len() == limit {
            break;
        }
        if !out.iter().any(|s| s == sku) {
            out.push(sku.to_string());
        }
    }
    out
}

fn shared_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

/// Ordered strategy chain over one index.
pub struct Resolver<'a> {
    index: &'a PricingIndex,
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl<'a> Resolver<'a> {
    /// SKU lookup first, then the key index.
    pub fn new(index: &'a PricingIndex) -> Self {
        Self::with_strategies(
            index,
            vec![Box::new(SkuFirstResolver), Box::new(IndexedResolver)],
        )
    }

    pub fn with_strategies(index: &'a PricingIndex, strategies: Vec<Box<dyn ResolveStrategy>>) -> Self {
        Self { index, strategies }
    }

    pub fn index(&self) -> &PricingIndex {
        self.index
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    pub fn resolve(&self, selection: &ProductSelection) -> Result<Resolved, ResolutionError> {
        validate_selection(selection)?;

        let mut miss: Option<ResolutionError> = None;
        for strategy in &self.strategies {
            match strategy.resolve(selection, self.index) {
                Ok(resolved) => {
                    debug!(strategy = strategy.name(), sku = %resolved.sku, "resolved selection");
                    return Ok(resolved);
                }
                Err(err) if err.is_miss() => {
                    trace!(strategy = strategy.name(), reason = %err.message, "strategy missed");
                    match miss.as_mut() {
                        Some(first) => first.merge(err),
                        None => miss = Some(err),
                    }
                }
                Err(err) => return Err(err),
            }
        }

        let mut err = miss.unwrap_or_else(|| {
            ResolutionError::missing(selection, "no resolution strategies configured")
        });
        let target = err.generated_sku.clone().unwrap_or_else(|| {
            format!(
                "{}-{}",
                selection.category.sku_prefix(),
                sku_token(&selection.product_type)
            )
        });
        err.near_misses = near_misses(self.index, &target, MAX_NEAR_MISSES);
        debug!(selection = %selection.describe(), "selection could not be priced");
        Err(err)
    }
}

impl std::fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("rows", &self.index.len())
            .field("strategies", &self.strategy_names())
            .finish()
    }
}
