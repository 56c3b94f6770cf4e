//! Lookup structures built once per catalog load.
//!
//! String parts of a key are trimmed and lower-cased, numbers are stored as
//! fixed-point thousandths so keys hash exactly. Post and gate styles fold
//! into a shared `picket` bucket, except for the two styles the catalog
//! prices separately.

use crate::model::{PricingRow, ProductCategory, ProductSelection, WidthSpec};
use std::collections::HashMap;

/// Styles that keep their own key for posts and gates.
const DISTINCT_STYLES: [&str; 2] = ["blade", "hamptons"];

/// Bucket every other post and gate style shares.
pub const GENERIC_STYLE: &str = "picket";

/// One key dimension: a concrete value or "applies to any".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart<T> {
    Wildcard,
    Exact(T),
}

impl<T> From<Option<T>> for KeyPart<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Exact(v),
            None => Self::Wildcard,
        }
    }
}

/// A dimension in thousandths of its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DimKey(i64);

impl DimKey {
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        Some(Self((value * 1000.0).round() as i64))
    }

    pub fn thousandths(&self) -> i64 {
        self.0
    }
}

pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Style key used for indexing: raw style for panels, the shared bucket for
/// everything else unless the style is priced on its own.
pub fn style_key(category: ProductCategory, style: &str) -> String {
    let style = normalize(style);
    if category == ProductCategory::Panel || DISTINCT_STYLES.contains(&style.as_str()) {
        style
    } else {
        GENERIC_STYLE.to_string()
    }
}

fn colour_key(colour: Option<&str>) -> KeyPart<String> {
    match colour.map(normalize) {
        Some(c) if !c.is_empty() => KeyPart::Exact(c),
        _ => KeyPart::Wildcard,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExactKey {
    pub category: ProductCategory,
    pub product_type: String,
    pub style: String,
    pub colour: KeyPart<String>,
    pub height: DimKey,
    pub width: KeyPart<DimKey>,
}

impl ExactKey {
    /// Key of a row with a discrete or absent width. Bracketed rows and rows
    /// with non-finite dimensions have none.
    pub fn for_row(row: &PricingRow) -> Option<Self> {
        let width = match row.width {
            None => KeyPart::Wildcard,
            Some(WidthSpec::Fixed(w)) => KeyPart::Exact(DimKey::from_f64(w)?),
            Some(WidthSpec::Range(_)) => return None,
        };
        Some(Self {
            category: row.category,
            product_type: normalize(&row.product_type),
            style: style_key(row.category, &row.style),
            colour: colour_key(row.colour.as_deref()),
            height: DimKey::from_f64(row.height)?,
            width,
        })
    }

    /// Key a selection looks up first. Needs a height.
    pub fn for_selection(selection: &ProductSelection) -> Option<Self> {
        let width = match selection.width {
            Some(w) => KeyPart::Exact(DimKey::from_f64(w)?),
            None => KeyPart::Wildcard,
        };
        Some(Self {
            category: selection.category,
            product_type: normalize(&selection.product_type),
            style: style_key(selection.category, &selection.style),
            colour: colour_key(selection.colour.as_deref()),
            height: DimKey::from_f64(selection.height?)?,
            width,
        })
    }

    pub fn with_any_colour(&self) -> Self {
        Self {
            colour: KeyPart::Wildcard,
            ..self.clone()
        }
    }

    pub fn with_any_width(&self) -> Self {
        Self {
            width: KeyPart::Wildcard,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlidingKey {
    pub product_type: String,
    pub style: String,
    pub height: DimKey,
}

impl SlidingKey {
    pub fn new(product_type: &str, style: &str, height: f64) -> Option<Self> {
        Some(Self {
            product_type: normalize(product_type),
            style: style_key(ProductCategory::SlidingGate, style),
            height: DimKey::from_f64(height)?,
        })
    }

    pub fn for_row(row: &PricingRow) -> Option<Self> {
        Self::new(&row.product_type, &row.style, row.height)
    }

    pub fn for_selection(selection: &ProductSelection) -> Option<Self> {
        Self::new(&selection.product_type, &selection.style, selection.height?)
    }
}

/// How a row's colour relates to a requested colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ColourMatch {
    Exact,
    Wildcard,
}

/// `None` when the row is for a different colour.
pub fn colour_match(row_colour: Option<&str>, wanted: Option<&str>) -> Option<ColourMatch> {
    match (colour_key(row_colour), colour_key(wanted)) {
        (KeyPart::Wildcard, _) => Some(ColourMatch::Wildcard),
        (KeyPart::Exact(row), KeyPart::Exact(wanted)) if row == wanted => Some(ColourMatch::Exact),
        _ => None,
    }
}

/// Exact-match, sliding-bracket and by-SKU lookups over a set of rows.
///
/// When two rows share a key the first one wins; validation reports the
/// clash.
#[derive(Debug, Clone, Default)]
pub struct PricingIndex {
    rows: Vec<PricingRow>,
    exact: HashMap<ExactKey, usize>,
    sliding: HashMap<SlidingKey, Vec<usize>>,
    by_sku: HashMap<String, usize>,
}

impl PricingIndex {
    pub fn build(rows: Vec<PricingRow>) -> Self {
        let mut exact = HashMap::new();
        let mut sliding: HashMap<SlidingKey, Vec<usize>> = HashMap::new();
        let mut by_sku = HashMap::new();

        for (i, row) in rows.iter().enumerate() {
            by_sku.entry(sku_key(&row.sku)).or_insert(i);

            let is_bracket = matches!(row.width, Some(WidthSpec::Range(_)));
            if row.category == ProductCategory::SlidingGate && is_bracket {
                if let Some(key) = SlidingKey::for_row(row) {
                    sliding.entry(key).or_default().push(i);
                }
            } else if let Some(key) = ExactKey::for_row(row) {
                exact.entry(key).or_insert(i);
            }
        }

        Self {
            rows,
            exact,
            sliding,
            by_sku,
        }
    }

    pub fn rows(&self) -> &[PricingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn lookup_exact(&self, key: &ExactKey) -> Option<&PricingRow> {
        self.exact.get(key).map(|&i| &self.rows[i])
    }

    /// Bracketed sliding gate rows for a key, in catalog order.
    pub fn sliding_bucket(&self, key: &SlidingKey) -> Vec<&PricingRow> {
        self.sliding
            .get(key)
            .map(|indices| indices.iter().map(|&i| &self.rows[i]).collect())
            .unwrap_or_default()
    }

    /// Case-insensitive SKU lookup.
    pub fn by_sku(&self, sku: &str) -> Option<&PricingRow> {
        self.by_sku.get(&sku_key(sku)).map(|&i| &self.rows[i])
    }

    /// All SKUs in catalog order.
    pub fn skus(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.sku.as_str())
    }
}

fn sku_key(sku: &str) -> String {
    sku.trim().to_uppercase()
}
