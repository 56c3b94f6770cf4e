//! # FencePlan
//!
//! Planning engine for fences and decks:
//! - Panel fitting with offcut reuse across runs
//! - Post placement and post-to-post spans
//! - Miter offsets and deck breaker layout
//! - Catalog-driven SKU resolution and quoting
//!
//! ## Architecture
//!
//! FencePlan is organized as a workspace with multiple crates:
//!
//! 1. **fenceplan-core** - Error types and measurement units
//! 2. **fenceplan-designer** - Geometry, snapping, offsets, posts, spans, breakers
//! 3. **fenceplan-cutlist** - Panel fitting and the leftover pool
//! 4. **fenceplan-catalog** - Pricing index, SKU resolution, validation, quotes
//! 5. **fenceplan-settings** - Engine configuration
//! 6. **fenceplan** - Project planner and the command line front end

pub mod planner;

pub use fenceplan_catalog as catalog;
pub use fenceplan_core as core;
pub use fenceplan_cutlist as cutlist;
pub use fenceplan_designer as designer;
pub use fenceplan_settings as settings;

pub use fenceplan_catalog::{Catalog, QuoteSummary, ResolutionError, Resolved};
pub use fenceplan_core::{Error, InputError, Result};
pub use fenceplan_cutlist::{fit_panels, BatchFit, Leftover, LeftoverPool, PanelFitConfig};
pub use fenceplan_settings::Config;
pub use planner::{
    plan_project, snap_engine, validate_project, DeckOutline, DeckPlan, ProductChoice, Project,
    ProjectPlan, ProjectProducts,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Logs go to stderr so JSON written to stdout stays clean. `RUST_LOG`
/// overrides the default `warn` level.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
