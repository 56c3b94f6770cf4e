//! Breaker lines for deck boards.
//!
//! Deck boards come in a maximum length; breaker lines split a deck outline
//! into divisions no longer than that along the board axis.

use crate::geometry::{polygon_bounds, Axis, Point};
use crate::model::BreakerLine;
use tracing::{debug, warn};

/// Most breakers a default layout may produce; more means the board length
/// and the outline are in different units.
pub const MAX_BREAKERS: usize = 500;

/// Places breakers at `min + M, min + 2M, ...` strictly below the outline's
/// maximum extent on `axis`, where `M` is `max_board_length`. Layouts that
/// would need more than [`MAX_BREAKERS`] give none.
pub fn default_breaker_lines(
    polygon: &[Point],
    axis: Axis,
    max_board_length: f64,
) -> Vec<BreakerLine> {
    let Some(bounds) = polygon_bounds(polygon) else {
        return Vec::new();
    };
    if !(max_board_length > 0.0) {
        return Vec::new();
    }

    let (min, max) = (bounds.min_on(axis), bounds.max_on(axis));
    let required = ((max - min) / max_board_length).ceil() - 1.0;
    if required > MAX_BREAKERS as f64 {
        warn!(?axis, max_board_length, required, "deck needs too many breakers");
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut pos = min + max_board_length;
    while pos < max {
        lines.push(BreakerLine {
            id: format!("breaker-{}", lines.len() + 1),
            axis,
            pos,
        });
        pos = min + max_board_length * (lines.len() + 1) as f64;
    }

    debug!(?axis, count = lines.len(), "default breaker lines");
    lines
}

/// Where a dragged breaker should land.
///
/// The proposal is clamped to `[min + margin, max - margin]` (the midpoint
/// when the margins overlap), then pulled onto the nearest outline vertex
/// coordinate on `axis` if one is within `threshold`.
pub fn snap_breaker_position(
    polygon: &[Point],
    axis: Axis,
    proposed: f64,
    margin: f64,
    threshold: f64,
) -> f64 {
    let Some(bounds) = polygon_bounds(polygon) else {
        return proposed;
    };
    let (min, max) = (bounds.min_on(axis), bounds.max_on(axis));
    let (lo, hi) = (min + margin, max - margin);
    let clamp = |v: f64| {
        if lo > hi {
            (min + max) / 2.0
        } else {
            v.clamp(lo, hi)
        }
    };

    let clamped = clamp(proposed);
    let nearest = polygon
        .iter()
        .map(|p| axis.coord(p))
        .map(|c| (c, (c - clamped).abs()))
        .filter(|&(_, d)| d <= threshold)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match nearest {
        Some((coord, _)) => clamp(coord),
        None => clamped,
    }
}

/// Lengths of the divisions the breakers cut the outline into along `axis`,
/// from the minimum extent to the maximum. Breakers outside the outline are
/// ignored.
pub fn board_runs(polygon: &[Point], axis: Axis, breakers: &[BreakerLine]) -> Vec<f64> {
    let Some(bounds) = polygon_bounds(polygon) else {
        return Vec::new();
    };
    let (min, max) = (bounds.min_on(axis), bounds.max_on(axis));

    let mut cuts: Vec<f64> = breakers
        .iter()
        .filter(|b| b.axis == axis && b.pos > min && b.pos < max)
        .map(|b| b.pos)
        .collect();
    cuts.sort_by(f64::total_cmp);

    let mut runs = Vec::with_capacity(cuts.len() + 1);
    let mut prev = min;
    for cut in cuts {
        runs.push(cut - prev);
        prev = cut;
    }
    runs.push(max - prev);
    runs
}
