//! SKU construction from typed selections.
//!
//! Grammar: `CAT-TYPE-STYLE[-COLOUR]-HEIGHT[-WIDTH]`. Text tokens are
//! upper-cased with every run of other characters collapsed to `_`.
//! Dimensions print without trailing zeros. Sliding gates put the bracket
//! they fall in where the width goes, as `MINtoMAX`.

use crate::index::{colour_match, style_key, ColourMatch, PricingIndex, SlidingKey};
use crate::model::{PricingRow, ProductCategory, ProductSelection, WidthRange};
use fenceplan_core::format_dimension;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkuBuildError {
    /// A text field is empty after normalisation.
    #[error("{field} is empty")]
    EmptyToken { field: &'static str },

    /// A dimension is missing, non-finite or not positive.
    #[error("{field} must be a positive number")]
    InvalidDimension { field: &'static str },

    /// No sliding bracket contains the requested width.
    #[error("no bracket contains width {width}")]
    NoBracket { width: f64, ranges: Vec<WidthRange> },
}

impl SkuBuildError {
    /// The inputs were fine but the catalog has nothing to build against.
    pub fn is_catalog_miss(&self) -> bool {
        matches!(self, Self::NoBracket { .. })
    }
}

/// Builds the SKU a selection is expected to be listed under.
pub trait SkuBuilder: Send + Sync {
    fn build(
        &self,
        selection: &ProductSelection,
        index: &PricingIndex,
    ) -> Result<String, SkuBuildError>;
}

/// Upper-cases `text` and collapses non-alphanumeric runs into `_`.
pub fn sku_token(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(c.to_ascii_uppercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

fn text_token(field: &'static str, text: &str) -> Result<String, SkuBuildError> {
    let token = sku_token(text);
    if token.is_empty() {
        return Err(SkuBuildError::EmptyToken { field });
    }
    Ok(token)
}

fn dim_token(field: &'static str, value: Option<f64>) -> Result<String, SkuBuildError> {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(format_dimension(v)),
        _ => Err(SkuBuildError::InvalidDimension { field }),
    }
}

/// `CAT-TYPE-STYLE[-COLOUR]` with the style already keyed.
fn head(selection: &ProductSelection, style: &str) -> Result<Vec<String>, SkuBuildError> {
    let mut parts = vec![
        selection.category.sku_prefix().to_string(),
        text_token("type", &selection.product_type)?,
        text_token("style", style)?,
    ];
    if let Some(colour) = selection.colour.as_deref() {
        let colour = sku_token(colour);
        if !colour.is_empty() {
            parts.push(colour);
        }
    }
    Ok(parts)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PanelSkuBuilder;

impl SkuBuilder for PanelSkuBuilder {
    fn build(
        &self,
        selection: &ProductSelection,
        _index: &PricingIndex,
    ) -> Result<String, SkuBuildError> {
        let mut parts = head(selection, &selection.style)?;
        parts.push(dim_token("height", selection.height)?);
        if selection.width.is_some() {
            parts.push(dim_token("width", selection.width)?);
        }
        Ok(parts.join("-"))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PostSkuBuilder;

impl SkuBuilder for PostSkuBuilder {
    fn build(
        &self,
        selection: &ProductSelection,
        _index: &PricingIndex,
    ) -> Result<String, SkuBuildError> {
        let style = style_key(selection.category, &selection.style);
        let mut parts = head(selection, &style)?;
        parts.push(dim_token("height", selection.height)?);
        Ok(parts.join("-"))
    }
}

/// Swing and sliding gates. Sliding gates need the index to find their
/// bracket.
#[derive(Debug, Clone, Copy, Default)]
pub struct GateSkuBuilder;

impl SkuBuilder for GateSkuBuilder {
    fn build(
        &self,
        selection: &ProductSelection,
        index: &PricingIndex,
    ) -> Result<String, SkuBuildError> {
        let style = style_key(selection.category, &selection.style);
        let mut parts = head(selection, &style)?;
        parts.push(dim_token("height", selection.height)?);
        let width = dim_token("width", selection.width)?;

        if selection.category == ProductCategory::SlidingGate {
            let requested = selection.width.unwrap_or_default();
            let bracket = find_bracket(index, selection)
                .ok_or_else(|| SkuBuildError::NoBracket {
                    width: requested,
                    ranges: bucket_ranges(index, selection),
                })?;
            parts.push(format!(
                "{}to{}",
                format_dimension(bracket.min),
                format_dimension(bracket.max)
            ));
        } else {
            parts.push(width);
        }
        Ok(parts.join("-"))
    }
}

/// Builder for a category.
pub fn default_builder_for(category: ProductCategory) -> Box<dyn SkuBuilder> {
    match category {
        ProductCategory::Panel => Box::new(PanelSkuBuilder),
        ProductCategory::Post => Box::new(PostSkuBuilder),
        ProductCategory::Gate | ProductCategory::SlidingGate => Box::new(GateSkuBuilder),
    }
}

/// First bracket in the selection's sliding bucket that contains its width,
/// preferring rows in the selection's colour over any-colour rows.
pub fn find_bracket(index: &PricingIndex, selection: &ProductSelection) -> Option<WidthRange> {
    find_bracket_row(index, selection).map(|(range, _)| range)
}

pub(crate) fn find_bracket_row<'a>(
    index: &'a PricingIndex,
    selection: &ProductSelection,
) -> Option<(WidthRange, &'a PricingRow)> {
    let width = selection.width?;
    let key = SlidingKey::for_selection(selection)?;
    let bucket = index.sliding_bucket(&key);

    for wanted in [ColourMatch::Exact, ColourMatch::Wildcard] {
        for row in &bucket {
            let Some(range) = row.width.and_then(|w| w.as_range()) else {
                continue;
            };
            let matches_colour =
                colour_match(row.colour.as_deref(), selection.colour.as_deref()) == Some(wanted);
            if matches_colour && range.contains(width) {
                return Some((range, *row));
            }
        }
    }
    None
}

/// Every bracket listed for the selection's sliding bucket, any colour,
/// without repeats.
pub fn bucket_ranges(index: &PricingIndex, selection: &ProductSelection) -> Vec<WidthRange> {
    let Some(key) = SlidingKey::for_selection(selection) else {
        return Vec::new();
    };
    let mut ranges: Vec<WidthRange> = Vec::new();
    for row in index.sliding_bucket(&key) {
        if let Some(range) = row.width.and_then(|w| w.as_range()) {
            if !ranges.contains(&range) {
                ranges.push(range);
            }
        }
    }
    ranges
}
