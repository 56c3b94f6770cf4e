use fenceplan_core::format_dimension;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of product a pricing row sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    Panel,
    Post,
    Gate,
    SlidingGate,
}

impl ProductCategory {
    /// Leading token of generated SKUs.
    pub fn sku_prefix(&self) -> &'static str {
        match self {
            Self::Panel => "PANEL",
            Self::Post => "POST",
            Self::Gate => "GATE",
            Self::SlidingGate => "SGATE",
        }
    }

    pub fn is_gate(&self) -> bool {
        matches!(self, Self::Gate | Self::SlidingGate)
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Panel => write!(f, "panel"),
            Self::Post => write!(f, "post"),
            Self::Gate => write!(f, "gate"),
            Self::SlidingGate => write!(f, "sliding_gate"),
        }
    }
}

/// Inclusive width bracket of a sliding gate row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidthRange {
    pub min: f64,
    pub max: f64,
}

impl WidthRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Both bounds are included.
    pub fn contains(&self, width: f64) -> bool {
        width >= self.min && width <= self.max
    }
}

impl fmt::Display for WidthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            format_dimension(self.min),
            format_dimension(self.max)
        )
    }
}

/// A row's width: one discrete value or a bracket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidthSpec {
    Fixed(f64),
    Range(WidthRange),
}

impl WidthSpec {
    pub fn as_range(&self) -> Option<WidthRange> {
        match self {
            Self::Range(range) => Some(*range),
            Self::Fixed(_) => None,
        }
    }
}

/// One priced catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRow {
    pub category: ProductCategory,
    #[serde(rename = "type")]
    pub product_type: String,
    pub style: String,
    /// `None` prices the row for any colour.
    #[serde(default)]
    pub colour: Option<String>,
    pub height: f64,
    /// `None` prices the row for any width.
    #[serde(default)]
    pub width: Option<WidthSpec>,
    pub sku: String,
    pub unit_price: f64,
}

/// What the user picked, as handed to the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSelection {
    pub category: ProductCategory,
    #[serde(rename = "type")]
    pub product_type: String,
    pub style: String,
    #[serde(default)]
    pub colour: Option<String>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
}

impl ProductSelection {
    pub fn new(
        category: ProductCategory,
        product_type: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            category,
            product_type: product_type.into(),
            style: style.into(),
            colour: None,
            height: None,
            width: None,
        }
    }

    pub fn with_colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Human-readable summary for quote rows.
    pub fn describe(&self) -> String {
        let mut parts = vec![
            self.category.to_string(),
            self.product_type.clone(),
            self.style.clone(),
        ];
        if let Some(colour) = &self.colour {
            parts.push(colour.clone());
        }
        if let Some(height) = self.height {
            parts.push(format!("H{}", format_dimension(height)));
        }
        if let Some(width) = self.width {
            parts.push(format!("W{}", format_dimension(width)));
        }
        parts.join(" ")
    }
}
