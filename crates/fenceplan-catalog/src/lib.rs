//! # Fenceplan Catalog
//!
//! Pricing catalog: rows, lookup index, SKU builders, the resolver chain,
//! load-time validation and quote assembly.
//!
//! ```text
//! PricingRow[] ── validate_catalog ──> ValidationReport
//!      │
//!      └── PricingIndex::build ──> Resolver [SkuFirstResolver, IndexedResolver]
//!                                     │
//!                   QuoteRequest[] ── build_quote ──> QuoteSummary
//! ```

pub mod error;
pub mod index;
pub mod manager;
pub mod model;
pub mod quote;
pub mod resolver;
pub mod sku;
pub mod validation;

pub use error::{CatalogError, CatalogResult, ResolutionError, ResolutionErrorKind};
pub use index::{style_key, DimKey, ExactKey, KeyPart, PricingIndex, SlidingKey};
pub use manager::Catalog;
pub use model::{PricingRow, ProductCategory, ProductSelection, WidthRange, WidthSpec};
pub use quote::{
    build_quote, MissingItem, QuoteLineItem, QuoteRequest, QuoteSettings, QuoteSummary,
};
pub use resolver::{
    IndexedResolver, MatchKind, ResolveStrategy, Resolved, Resolver, SkuFirstResolver,
};
pub use sku::{
    default_builder_for, GateSkuBuilder, PanelSkuBuilder, PostSkuBuilder, SkuBuildError,
    SkuBuilder,
};
pub use validation::{validate_catalog, FindingKind, ValidationFinding, ValidationReport};
