//! Post-to-post spans along chained fence lines.
//!
//! Posts are located on a chain by projection and ordered by their distance
//! along it. A post shared by two lines at a corner appears once, so every
//! physical gap between consecutive posts yields exactly one span.

use crate::geometry::closest_point_on_segment;
use crate::model::{Line, Post};
use crate::topology::{Chain, LineGraph};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Posts closer than this along a chain are the same station.
const STATION_EPSILON: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    /// Index of the chain this span belongs to.
    pub chain: usize,
    pub from_post: String,
    pub to_post: String,
    /// Distance between the posts in run units.
    pub length: f64,
}

/// Orders posts along each chain of `lines` and measures the gaps.
///
/// Posts further than `tolerance` from every line of a chain are ignored for
/// that chain. Closed loops also yield the span that closes the loop.
pub fn derive_spans(lines: &[Line], posts: &[Post], tolerance: f64) -> Vec<Span> {
    let graph = LineGraph::build(lines, tolerance);
    let chains = graph.chains();
    let mut spans = Vec::new();

    for (ci, chain) in chains.iter().enumerate() {
        spans.extend(chain_spans(ci, chain, lines, posts, tolerance));
    }

    debug!(chains = chains.len(), spans = spans.len(), "derived spans");
    spans
}

fn chain_spans(
    chain_index: usize,
    chain: &Chain,
    lines: &[Line],
    posts: &[Post],
    tolerance: f64,
) -> Vec<Span> {
    let tol_sq = tolerance * tolerance;

    let mut offsets = Vec::with_capacity(chain.links.len());
    let mut total = 0.0;
    for link in &chain.links {
        offsets.push(total);
        total += lines[link.line].length;
    }

    let mut stations: Vec<(f64, &str)> = Vec::new();
    for post in posts {
        let mut best: Option<(f64, f64)> = None;
        for (link, offset) in chain.links.iter().zip(&offsets) {
            let line = &lines[link.line];
            let proj = closest_point_on_segment(post.pos, line.a, line.b);
            if proj.distance_sq > tol_sq {
                continue;
            }
            let along = if link.reversed { 1.0 - proj.t } else { proj.t };
            if best.map_or(true, |(d, _)| proj.distance_sq < d) {
                best = Some((proj.distance_sq, offset + along * line.length));
            }
        }
        if let Some((_, mut distance)) = best {
            if chain.closed && distance >= total - STATION_EPSILON {
                distance = 0.0;
            }
            stations.push((distance, post.id.as_str()));
        }
    }

    stations.sort_by(|a, b| a.0.total_cmp(&b.0));
    stations.dedup_by(|later, earlier| (later.0 - earlier.0).abs() < STATION_EPSILON);

    let mut spans: Vec<Span> = stations
        .windows(2)
        .map(|w| Span {
            chain: chain_index,
            from_post: w[0].1.to_string(),
            to_post: w[1].1.to_string(),
            length: w[1].0 - w[0].0,
        })
        .collect();

    if chain.closed {
        if let (Some(first), Some(last)) = (stations.first(), stations.last()) {
            spans.push(Span {
                chain: chain_index,
                from_post: last.1.to_string(),
                to_post: first.1.to_string(),
                length: total - last.0 + first.0,
            });
        }
    }

    spans
}
