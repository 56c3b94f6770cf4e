//! Post placement from finished geometry.
//!
//! Vertex posts sit where lines end or meet; their category follows from how
//! many runs meet there and whether the fence turns. Panel posts sit on the
//! interior panel boundaries computed by panel fitting.

use crate::geometry::Point;
use crate::model::{Line, LineEnd, Post, PostCategory, PostSource};
use crate::topology::{LineGraph, Vertex};
use std::collections::BTreeMap;
use tracing::debug;

/// Two runs meeting at less than ~5 degrees off straight count as one run.
const STRAIGHT_THROUGH_COS: f64 = -0.996;

/// Panel boundaries closer than this to a line end are not separate posts.
const BOUNDARY_EPSILON: f64 = 0.5;

fn classify(vertex: &Vertex, lines: &[Line]) -> PostCategory {
    match vertex.degree() {
        0 | 1 => PostCategory::End,
        2 => {
            let away = |(li, end): (usize, LineEnd)| -> Option<Point> {
                let line = &lines[li];
                let other = match end {
                    LineEnd::A => line.b,
                    LineEnd::B => line.a,
                };
                (other - line.endpoint(end)).normalized()
            };
            match (away(vertex.ends[0]), away(vertex.ends[1])) {
                (Some(d1), Some(d2)) if d1.dot(&d2) <= STRAIGHT_THROUGH_COS => PostCategory::Line,
                _ => PostCategory::Corner,
            }
        }
        _ => PostCategory::T,
    }
}

/// Places vertex posts at every line endpoint cluster and panel posts at the
/// interior boundaries listed in `panel_positions` (keyed by line id,
/// offsets from the line's `a` end in run units).
pub fn derive_posts(
    lines: &[Line],
    panel_positions: &BTreeMap<String, Vec<f64>>,
    tolerance: f64,
) -> Vec<Post> {
    let graph = LineGraph::build(lines, tolerance);
    let mut posts: Vec<Post> = graph
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, vertex)| Post {
            id: format!("post-v{}", i + 1),
            pos: vertex.pos,
            category: classify(vertex, lines),
            source: PostSource::Vertex,
        })
        .collect();

    let mut panel_count = 0;
    for line in lines {
        let Some(positions) = panel_positions.get(&line.id) else {
            continue;
        };
        for &offset in positions {
            if offset <= BOUNDARY_EPSILON || offset >= line.length - BOUNDARY_EPSILON {
                continue;
            }
            panel_count += 1;
            posts.push(Post {
                id: format!("post-p{}", panel_count),
                pos: line.point_at_offset(offset),
                category: PostCategory::Line,
                source: PostSource::Panel,
            });
        }
    }

    debug!(
        vertex_posts = graph.vertices().len(),
        panel_posts = panel_count,
        "derived posts"
    );
    posts
}
