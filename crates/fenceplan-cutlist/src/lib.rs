//! # Fenceplan Cutlist
//!
//! Cutting-stock layer: packs straight fence runs into fixed-length panels
//! and keeps the offcuts for later cuts.
//!
//! - [`leftover`]: the offcut pool, with permanent consumption and
//!   deterministic `lo-N` ids
//! - [`panel_fit`]: per-run fitting (full panels plus a remainder, or even
//!   spacing) and batch fitting over a shared pool
//!
//! ```rust
//! use fenceplan_cutlist::{count_boards_purchased, fit_panels, LeftoverPool, PanelFitConfig};
//!
//! let mut pool = LeftoverPool::new();
//! let result = fit_panels("run-1", 5000.0, false, &mut pool, &PanelFitConfig::default());
//! assert_eq!(count_boards_purchased(&result.segments), 3);
//! assert_eq!(pool.available().next().map(|l| l.length), Some(1870.0));
//! ```

pub mod leftover;
pub mod panel_fit;

pub use leftover::{Leftover, LeftoverPool};
pub use panel_fit::{
    count_boards_purchased, fit_panels, fit_runs, BatchFit, PanelFitConfig, PanelFitResult,
    PanelSegment, RunFit, RunRequest,
};
