//! Quote assembly from quantity requests.
//!
//! Every request is resolved independently. Priced requests with the same
//! SKU merge into one line; failures become placeholder rows instead of
//! aborting the quote.

use crate::error::ResolutionError;
use crate::model::ProductSelection;
use crate::resolver::Resolver;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_TAX_RATE: f64 = 0.10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSettings {
    /// Added on top of the priced total; 0.10 is 10%.
    pub tax_rate: f64,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
        }
    }
}

/// A quantity of one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub selection: ProductSelection,
    pub quantity: u32,
    /// Fence length this request accounts for, in mm.
    #[serde(default)]
    pub length_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl QuoteRequest {
    pub fn new(selection: ProductSelection, quantity: u32) -> Self {
        Self {
            selection,
            quantity,
            length_mm: 0.0,
            label: None,
        }
    }

    pub fn with_length_mm(mut self, length_mm: f64) -> Self {
        self.length_mm = length_mm;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineItem {
    pub sku: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priced_width: Option<f64>,
}

/// A request that could not be priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub description: String,
    pub quantity: u32,
    pub error: ResolutionError,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    /// One row per SKU, sorted by SKU.
    pub line_items: Vec<QuoteLineItem>,
    pub missing_items: Vec<MissingItem>,
    pub priced_total: f64,
    pub grand_total: f64,
    pub total_length_mm: f64,
}

impl QuoteSummary {
    pub fn is_complete(&self) -> bool {
        self.missing_items.is_empty()
    }

    pub fn line(&self, sku: &str) -> Option<&QuoteLineItem> {
        self.line_items.iter().find(|l| l.sku == sku)
    }
}

/// Rounds to whole cents.
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Prices `requests` and totals them.
pub fn build_quote(
    requests: &[QuoteRequest],
    resolver: &Resolver<'_>,
    settings: &QuoteSettings,
) -> QuoteSummary {
    let mut summary = QuoteSummary::default();

    for request in requests {
        summary.total_length_mm += request.length_mm;
        if request.quantity == 0 {
            continue;
        }

        match resolver.resolve(&request.selection) {
            Ok(resolved) => {
                match summary.line_items.iter_mut().find(|l| l.sku == resolved.sku) {
                    Some(line) => line.quantity += request.quantity,
                    None => summary.line_items.push(QuoteLineItem {
                        sku: resolved.sku,
                        description: request.selection.describe(),
                        quantity: request.quantity,
                        unit_price: resolved.unit_price,
                        line_total: 0.0,
                        priced_width: resolved.priced_width,
                    }),
                }
            }
            Err(error) => {
                warn!(
                    kind = %error.kind,
                    selection = %request.selection.describe(),
                    "quote item left unpriced"
                );
                summary.missing_items.push(MissingItem {
                    label: request.label.clone(),
                    description: request.selection.describe(),
                    quantity: request.quantity,
                    error,
                });
            }
        }
    }

    for line in &mut summary.line_items {
        line.line_total = round_currency(line.unit_price * f64::from(line.quantity));
    }
    summary.line_items.sort_by(|a, b| a.sku.cmp(&b.sku));

    summary.priced_total = round_currency(summary.line_items.iter().map(|l| l.line_total).sum());
    summary.grand_total = round_currency(summary.priced_total * (1.0 + settings.tax_rate));

    debug!(
        lines = summary.line_items.len(),
        missing = summary.missing_items.len(),
        priced_total = summary.priced_total,
        "built quote"
    );
    summary
}
