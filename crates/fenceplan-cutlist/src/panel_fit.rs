//! Panel fitting for straight fence runs.
//!
//! A run is filled with fixed-length panels. Whatever does not fill a whole
//! panel is cut either from an offcut in the pool or from a fresh panel, and
//! usable waste goes back into the pool for later cuts.
//!
//! The pool is walked in processing order, so fitting the same runs in a
//! different order can reuse different offcuts.

use crate::leftover::{Leftover, LeftoverPool};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_PANEL_LENGTH: f64 = 2390.0;
pub const DEFAULT_CUT_BUFFER: f64 = 300.0;
pub const DEFAULT_MIN_LEFTOVER: f64 = 300.0;
pub const DEFAULT_MAX_PANELS_PER_RUN: usize = 500;

/// Remainders shorter than this are float noise, not a cut.
const REMAINDER_EPSILON: f64 = 1e-6;

/// Material constants for panel fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelFitConfig {
    /// Length of a stock panel.
    pub panel_length: f64,
    /// Kerf and margin reserved for every cut.
    pub cut_buffer: f64,
    /// Shortest offcut worth keeping.
    pub min_leftover: f64,
    /// Runs needing more panels than this are rejected.
    pub max_panels_per_run: usize,
}

impl Default for PanelFitConfig {
    fn default() -> Self {
        Self {
            panel_length: DEFAULT_PANEL_LENGTH,
            cut_buffer: DEFAULT_CUT_BUFFER,
            min_leftover: DEFAULT_MIN_LEFTOVER,
            max_panels_per_run: DEFAULT_MAX_PANELS_PER_RUN,
        }
    }
}

/// One physical piece placed along a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelSegment {
    pub id: String,
    pub run_id: String,
    pub start: f64,
    pub end: f64,
    pub length: f64,
    /// Offcut this piece was cut from; `None` means new material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses_leftover_id: Option<String>,
    #[serde(default)]
    pub is_remainder: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelFitResult {
    pub segments: Vec<PanelSegment>,
    /// Segment boundaries along the run, from 0 to the run length.
    pub panel_positions: Vec<f64>,
    /// Offcuts spawned by this run, already appended to the pool.
    pub new_leftovers: Vec<Leftover>,
    pub warnings: Vec<String>,
}

impl PanelFitResult {
    fn rejected(warning: String) -> Self {
        Self {
            warnings: vec![warning],
            ..Self::default()
        }
    }

    pub fn boards_purchased(&self) -> usize {
        count_boards_purchased(&self.segments)
    }
}

/// Number of segments that need new material.
pub fn count_boards_purchased(segments: &[PanelSegment]) -> usize {
    segments
        .iter()
        .filter(|s| s.uses_leftover_id.is_none())
        .count()
}

/// Fills one run with panels, drawing offcuts from and returning waste to
/// `pool`.
pub fn fit_panels(
    run_id: &str,
    run_length: f64,
    even_spacing: bool,
    pool: &mut LeftoverPool,
    config: &PanelFitConfig,
) -> PanelFitResult {
    if !run_length.is_finite() || run_length <= 0.0 {
        warn!(run_id, run_length, "rejecting run with invalid length");
        return PanelFitResult::rejected(format!(
            "Run {} has an invalid length ({}); nothing was fitted",
            run_id, run_length
        ));
    }
    if !(config.panel_length > 0.0) {
        warn!(run_id, panel_length = config.panel_length, "invalid panel length");
        return PanelFitResult::rejected(format!(
            "Panel length must be positive (got {}); run {} was not fitted",
            config.panel_length, run_id
        ));
    }

    let ratio = run_length / config.panel_length;
    let required = ratio.ceil();
    if required > config.max_panels_per_run as f64 {
        warn!(run_id, run_length, required, "run needs too many panels");
        return PanelFitResult::rejected(format!(
            "Run {} needs {} panels, more than the limit of {}; check the drawing units",
            run_id, required, config.max_panels_per_run
        ));
    }

    let mut fitter = RunFitter {
        run_id,
        pool,
        config,
        result: PanelFitResult::default(),
    };

    if even_spacing {
        fitter.fit_even(run_length, required as usize);
    } else {
        fitter.fit_full_then_remainder(run_length, ratio.floor() as usize);
    }

    let mut result = fitter.result;
    result.panel_positions = std::iter::once(0.0)
        .chain(result.segments.iter().map(|s| s.end))
        .collect();

    debug!(
        run_id,
        run_length,
        even_spacing,
        segments = result.segments.len(),
        spawned = result.new_leftovers.len(),
        "fitted run"
    );
    result
}

struct RunFitter<'a> {
    run_id: &'a str,
    pool: &'a mut LeftoverPool,
    config: &'a PanelFitConfig,
    result: PanelFitResult,
}

impl RunFitter<'_> {
    fn fit_full_then_remainder(&mut self, run_length: f64, full_panels: usize) {
        let panel = self.config.panel_length;
        for i in 0..full_panels {
            let start = i as f64 * panel;
            self.push_segment(start, start + panel, None, false);
        }

        let start = full_panels as f64 * panel;
        let mut remainder = run_length - start;
        if remainder < REMAINDER_EPSILON {
            remainder = 0.0;
        }
        if remainder <= 0.0 {
            return;
        }

        let source = self.source_cut(remainder);
        self.push_segment(start, run_length, source, true);

        if remainder < self.config.min_leftover {
            self.result.warnings.push(format!(
                "Run {} ends with a short {} piece; enable even spacing or extend the run",
                self.run_id,
                fenceplan_core::format_dimension(remainder)
            ));
        }
    }

    fn fit_even(&mut self, run_length: f64, count: usize) {
        let spacing = run_length / count as f64;
        let needs_cut = spacing < self.config.panel_length - REMAINDER_EPSILON;

        for i in 0..count {
            let start = i as f64 * spacing;
            let end = if i + 1 == count {
                run_length
            } else {
                (i + 1) as f64 * spacing
            };
            let source = if needs_cut {
                self.source_cut(end - start)
            } else {
                None
            };
            self.push_segment(start, end, source, false);
        }
    }

    /// Picks material for a cut piece: the largest offcut that covers the cut
    /// plus buffer, else a fresh panel. Usable waste is returned to the pool.
    fn source_cut(&mut self, cut: f64) -> Option<String> {
        let config = self.config;
        let needed = cut + config.cut_buffer;

        let (source_id, waste) = match self.pool.take_largest_at_least(needed) {
            Some(leftover) => (Some(leftover.id), leftover.length - needed),
            None => (None, config.panel_length - needed),
        };

        if waste >= config.min_leftover {
            let spawned = self.pool.spawn(waste);
            self.result.new_leftovers.push(spawned);
        }
        source_id
    }

    fn push_segment(&mut self, start: f64, end: f64, uses_leftover_id: Option<String>, is_remainder: bool) {
        let id = format!("{}-seg-{}", self.run_id, self.result.segments.len() + 1);
        self.result.segments.push(PanelSegment {
            id,
            run_id: self.run_id.to_string(),
            start,
            end,
            length: end - start,
            uses_leftover_id,
            is_remainder,
        });
    }
}

/// A run queued for batch fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub run_id: String,
    pub length: f64,
    #[serde(default)]
    pub even_spacing: bool,
}

impl RunRequest {
    pub fn new(run_id: impl Into<String>, length: f64, even_spacing: bool) -> Self {
        Self {
            run_id: run_id.into(),
            length,
            even_spacing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunFit {
    pub run_id: String,
    #[serde(flatten)]
    pub result: PanelFitResult,
}

/// Results of fitting several runs against one pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFit {
    pub runs: Vec<RunFit>,
    pub boards_purchased: usize,
    /// Warnings of every run, in run order.
    pub warnings: Vec<String>,
}

impl BatchFit {
    pub fn get(&self, run_id: &str) -> Option<&PanelFitResult> {
        self.runs
            .iter()
            .find(|r| r.run_id == run_id)
            .map(|r| &r.result)
    }

    pub fn segments(&self) -> impl Iterator<Item = &PanelSegment> {
        self.runs.iter().flat_map(|r| r.result.segments.iter())
    }
}

/// Fits `runs` in the given order against a shared pool.
pub fn fit_runs(runs: &[RunRequest], pool: &mut LeftoverPool, config: &PanelFitConfig) -> BatchFit {
    let mut batch = BatchFit::default();
    for run in runs {
        let result = fit_panels(&run.run_id, run.length, run.even_spacing, pool, config);
        batch.boards_purchased += result.boards_purchased();
        batch.warnings.extend(result.warnings.iter().cloned());
        batch.runs.push(RunFit {
            run_id: run.run_id.clone(),
            result,
        });
    }
    batch
}
