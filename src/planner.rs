//! Project planning pipeline.
//!
//! Takes the records the editor saves (lines, gates, leftover stock and the
//! chosen products) and produces the cut list, post layout, spans and a
//! priced quote in one pass.
//!
//! Gate openings are taken off the end of the run they sit on, so panel
//! boundaries are measured from the line's `a` end.

use fenceplan_catalog::{
    build_quote, Catalog, ProductCategory, ProductSelection, QuoteRequest, QuoteSettings,
    QuoteSummary,
};
use fenceplan_core::{format_length, InputError};
use fenceplan_cutlist::{fit_runs, BatchFit, Leftover, LeftoverPool, PanelFitConfig, RunRequest};
use fenceplan_designer::{
    board_runs, default_breaker_lines, derive_posts, derive_spans, polygon_bounds,
    snap_breaker_position, Axis, BreakerLine, Gate, Line, Polygon, Post, SnapEngine, SnapOptions,
    Span,
};
use fenceplan_settings::Config;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info, warn};

/// Endpoints closer than this belong to the same post.
pub const JOIN_TOLERANCE: f64 = 1.0;

/// Run lengths are in mm; catalog heights and widths are in metres.
const MM_PER_M: f64 = 1000.0;

/// Catalog attributes of one product choice. Height is in metres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChoice {
    #[serde(rename = "type")]
    pub product_type: String,
    pub style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colour: Option<String>,
    pub height: f64,
}

impl ProductChoice {
    fn selection(&self, category: ProductCategory) -> ProductSelection {
        let mut selection = ProductSelection::new(category, &self.product_type, &self.style)
            .with_height(self.height);
        if let Some(colour) = &self.colour {
            selection = selection.with_colour(colour.as_str());
        }
        selection
    }
}

/// Products used across the project. Sliding gates fall back to the swing
/// gate choice when no sliding choice is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProducts {
    pub panel: ProductChoice,
    pub post: ProductChoice,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<ProductChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sliding_gate: Option<ProductChoice>,
}

impl ProjectProducts {
    fn gate_choice(&self, gate: &Gate) -> Option<&ProductChoice> {
        if gate.gate_type.is_sliding() {
            self.sliding_gate.as_ref().or(self.gate.as_ref())
        } else {
            self.gate.as_ref()
        }
    }
}

/// Deck outline laid out alongside the fence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckOutline {
    pub outline: Polygon,
    /// Axis the boards run along.
    pub board_axis: Axis,
    /// Breakers placed by hand, snapped the way a drag would be. The default
    /// layout is used when empty.
    #[serde(default)]
    pub breakers: Vec<BreakerLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub lines: Vec<Line>,
    #[serde(default)]
    pub gates: Vec<Gate>,
    /// Offcuts already in stock.
    #[serde(default)]
    pub leftovers: Vec<Leftover>,
    pub products: ProjectProducts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<DeckOutline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckPlan {
    pub breakers: Vec<BreakerLine>,
    /// Division lengths along the board axis.
    pub board_runs: Vec<f64>,
    /// Boards laid side by side across the deck.
    pub board_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPlan {
    pub fits: BatchFit,
    pub posts: Vec<Post>,
    pub spans: Vec<Span>,
    /// Pool state after fitting, spawned offcuts included.
    pub leftovers: Vec<Leftover>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deck: Option<DeckPlan>,
    pub quote: QuoteSummary,
    /// Total line length in the configured measurement system.
    pub total_length: String,
}

/// Engine settings derived from the loaded configuration.
pub fn panel_fit_config(config: &Config) -> PanelFitConfig {
    PanelFitConfig {
        panel_length: config.panels.panel_length,
        cut_buffer: config.panels.cut_buffer,
        min_leftover: config.panels.min_leftover,
        max_panels_per_run: config.panels.max_panels_per_run,
    }
}

/// Snap engine for an editing surface working on this project.
pub fn snap_engine(config: &Config) -> SnapEngine {
    SnapEngine::new(SnapOptions {
        tolerance: config.snapping.tolerance,
        angle_step_deg: config.snapping.angle_step_deg,
        grid_spacing: config.snapping.grid_spacing,
        orthogonal: config.snapping.orthogonal,
    })
}

pub fn quote_settings(config: &Config) -> QuoteSettings {
    QuoteSettings {
        tax_rate: config.quote.tax_rate,
    }
}

/// Rejects projects whose records do not line up.
pub fn validate_project(project: &Project) -> Result<(), InputError> {
    let mut line_ids = HashSet::new();
    for line in &project.lines {
        if !line_ids.insert(line.id.as_str()) {
            return Err(InputError::DuplicateId {
                kind: "line".to_string(),
                id: line.id.clone(),
            });
        }
        if !(line.length.is_finite() && line.length >= 0.0) {
            return Err(InputError::InvalidValue {
                field: format!("lines[{}].length", line.id),
                value: line.length.to_string(),
            });
        }
    }

    let mut gate_ids = HashSet::new();
    for gate in &project.gates {
        if !gate_ids.insert(gate.id.as_str()) {
            return Err(InputError::DuplicateId {
                kind: "gate".to_string(),
                id: gate.id.clone(),
            });
        }
        if !line_ids.contains(gate.run_id.as_str()) {
            return Err(InputError::UnknownId {
                kind: "line".to_string(),
                id: gate.run_id.clone(),
            });
        }
        if !(gate.opening_width.is_finite() && gate.opening_width > 0.0) {
            return Err(InputError::InvalidValue {
                field: format!("gates[{}].openingWidth", gate.id),
                value: gate.opening_width.to_string(),
            });
        }
    }
    Ok(())
}

/// Panelled length of a line once its gate openings are taken out.
fn fence_length(line: &Line, gates: &[Gate]) -> f64 {
    let openings: f64 = gates
        .iter()
        .filter(|g| g.run_id == line.id)
        .map(|g| g.opening_width)
        .sum();
    (line.length - openings).max(0.0)
}

fn plan_deck(deck: &DeckOutline, config: &Config) -> DeckPlan {
    let settings = &config.deck;
    let breakers = if deck.breakers.is_empty() {
        default_breaker_lines(&deck.outline, deck.board_axis, settings.max_board_length)
    } else {
        deck.breakers
            .iter()
            .map(|b| BreakerLine {
                pos: snap_breaker_position(
                    &deck.outline,
                    b.axis,
                    b.pos,
                    settings.breaker_margin,
                    settings.breaker_snap_threshold,
                ),
                ..b.clone()
            })
            .collect()
    };
    let board_runs = board_runs(&deck.outline, deck.board_axis, &breakers);
    for run in &board_runs {
        if *run > settings.max_board_length {
            warn!(
                run = %format_length(*run, config.measurement_system),
                max = %format_length(settings.max_board_length, config.measurement_system),
                "deck division longer than a board"
            );
        }
    }
    let across = deck.board_axis.other();
    let board_rows = polygon_bounds(&deck.outline)
        .map(|b| ((b.max_on(across) - b.min_on(across)) / settings.board_width).ceil() as usize)
        .unwrap_or(0);
    DeckPlan {
        breakers,
        board_runs,
        board_rows,
    }
}

/// Runs the whole pipeline for `project`.
pub fn plan_project(
    project: &Project,
    catalog: &Catalog,
    config: &Config,
) -> Result<ProjectPlan, InputError> {
    validate_project(project)?;

    let fit_config = panel_fit_config(config);
    let runs: Vec<RunRequest> = project
        .lines
        .iter()
        .filter_map(|line| {
            let length = fence_length(line, &project.gates);
            if length <= 0.0 {
                debug!(line = %line.id, "line is all gate openings");
                return None;
            }
            Some(RunRequest::new(line.id.as_str(), length, line.even_spacing))
        })
        .collect();

    let mut pool = LeftoverPool::from_leftovers(project.leftovers.clone());
    let fits = fit_runs(&runs, &mut pool, &fit_config);

    let positions: BTreeMap<String, Vec<f64>> = fits
        .runs
        .iter()
        .map(|r| (r.run_id.clone(), r.result.panel_positions.clone()))
        .collect();
    let posts = derive_posts(&project.lines, &positions, JOIN_TOLERANCE);
    let spans = derive_spans(&project.lines, &posts, JOIN_TOLERANCE);

    let products = &project.products;
    let panel_width = fit_config.panel_length / MM_PER_M;
    let mut requests: Vec<QuoteRequest> = project
        .lines
        .iter()
        .map(|line| {
            let purchased = fits.get(&line.id).map_or(0, |r| r.boards_purchased());
            QuoteRequest::new(
                products
                    .panel
                    .selection(ProductCategory::Panel)
                    .with_width(panel_width),
                purchased as u32,
            )
            .with_length_mm(line.length)
            .with_label(line.id.as_str())
        })
        .collect();

    requests.push(
        QuoteRequest::new(products.post.selection(ProductCategory::Post), posts.len() as u32)
            .with_label("posts"),
    );

    for gate in &project.gates {
        let Some(choice) = products.gate_choice(gate) else {
            warn!(gate = %gate.id, "no gate product chosen, gate left out of the quote");
            continue;
        };
        let category = if gate.gate_type.is_sliding() {
            ProductCategory::SlidingGate
        } else {
            ProductCategory::Gate
        };
        let selection = choice
            .selection(category)
            .with_width(gate.opening_width / MM_PER_M);
        requests.push(QuoteRequest::new(selection, 1).with_label(gate.id.as_str()));
    }

    let quote = build_quote(&requests, &catalog.resolver(), &quote_settings(config));
    let deck = project.deck.as_ref().map(|d| plan_deck(d, config));

    let total_length = format_length(quote.total_length_mm, config.measurement_system);
    info!(
        runs = fits.runs.len(),
        length = %total_length,
        boards = fits.boards_purchased,
        posts = posts.len(),
        spans = spans.len(),
        grand_total = quote.grand_total,
        "planned project"
    );

    Ok(ProjectPlan {
        fits,
        posts,
        spans,
        leftovers: pool.all().to_vec(),
        deck,
        quote,
        total_length,
    })
}
