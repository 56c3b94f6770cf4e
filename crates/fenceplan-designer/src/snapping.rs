//! Snap resolution used while editing geometry.
//!
//! Line snapping prefers endpoints over mid-segment hits: an endpoint within
//! tolerance always wins, even when a segment hit is closer. Lines carrying
//! gates or openings are never split, so they only offer their endpoints.

use crate::geometry::{closest_point_on_segment, Point};
use crate::model::{Line, LineEnd};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default angle snapping increment in degrees.
pub const DEFAULT_ANGLE_STEP_DEG: f64 = 15.0;

/// What a line snap attached to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "kind")]
pub enum LineSnapTarget {
    Endpoint { line_id: String, end: LineEnd },
    Segment { line_id: String, t: f64 },
}

/// A resolved line snap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapHit {
    pub point: Point,
    pub target: LineSnapTarget,
    /// Distance from the query point to `point`.
    pub distance: f64,
}

impl SnapHit {
    pub fn is_endpoint(&self) -> bool {
        matches!(self.target, LineSnapTarget::Endpoint { .. })
    }
}

/// Width of the `t` band near 0 and 1 where a projection counts as an
/// endpoint hit.
pub fn endpoint_band(tolerance: f64) -> f64 {
    (tolerance * 0.1).min(0.1).max(0.02)
}

/// Finds the best snap for `p` among `lines`.
///
/// Endpoint candidates (endpoints within `tolerance`) dominate segment
/// candidates. A projection inside the endpoint band is not a segment
/// candidate, so a point near the end of a long line but far from its
/// endpoint snaps to nothing on that line.
pub fn find_snap_on_lines(p: Point, lines: &[Line], tolerance: f64) -> Option<SnapHit> {
    let tol_sq = tolerance * tolerance;
    let band = endpoint_band(tolerance);

    let mut best_endpoint: Option<(f64, &Line, LineEnd)> = None;
    let mut best_segment: Option<(f64, &Line, Point, f64)> = None;

    for line in lines {
        for end in [LineEnd::A, LineEnd::B] {
            let d_sq = p.distance_sq_to(&line.endpoint(end));
            if d_sq <= tol_sq {
                offer_endpoint(&mut best_endpoint, d_sq, line, end);
            }
        }

        if line.is_non_mergeable() {
            continue;
        }

        let proj = closest_point_on_segment(p, line.a, line.b);
        if proj.distance_sq > tol_sq {
            continue;
        }

        if proj.t <= band || proj.t >= 1.0 - band {
            // band hits snap to the endpoint or to nothing
            let end = if proj.t <= band { LineEnd::A } else { LineEnd::B };
            let d_sq = p.distance_sq_to(&line.endpoint(end));
            if d_sq <= tol_sq {
                offer_endpoint(&mut best_endpoint, d_sq, line, end);
            }
        } else if best_segment.map_or(true, |(best_d, _, _, _)| proj.distance_sq < best_d) {
            best_segment = Some((proj.distance_sq, line, proj.point, proj.t));
        }
    }

    if let Some((d_sq, line, end)) = best_endpoint {
        trace!(line = %line.id, ?end, "endpoint snap");
        return Some(SnapHit {
            point: line.endpoint(end),
            target: LineSnapTarget::Endpoint {
                line_id: line.id.clone(),
                end,
            },
            distance: d_sq.sqrt(),
        });
    }

    best_segment.map(|(d_sq, line, point, t)| {
        trace!(line = %line.id, t, "segment snap");
        SnapHit {
            point,
            target: LineSnapTarget::Segment {
                line_id: line.id.clone(),
                t,
            },
            distance: d_sq.sqrt(),
        }
    })
}

fn offer_endpoint<'a>(
    best: &mut Option<(f64, &'a Line, LineEnd)>,
    d_sq: f64,
    line: &'a Line,
    end: LineEnd,
) {
    if best.map_or(true, |(best_d, _, _)| d_sq < best_d) {
        *best = Some((d_sq, line, end));
    }
}

/// Rotates `free` around `anchor` onto the nearest multiple of `step_deg`,
/// keeping its distance from the anchor.
pub fn snap_angle(anchor: Point, free: Point, step_deg: f64) -> Point {
    let delta = free - anchor;
    let dist = delta.length();
    if dist <= f64::EPSILON || step_deg <= 0.0 {
        return free;
    }
    let step = step_deg.to_radians();
    let angle = delta.y.atan2(delta.x);
    let snapped = (angle / step).round() * step;
    anchor + Point::new(snapped.cos(), snapped.sin()) * dist
}

/// Keeps the dominant axis of `free - anchor` and zeroes the other.
pub fn snap_orthogonal(anchor: Point, free: Point) -> Point {
    let dx = free.x - anchor.x;
    let dy = free.y - anchor.y;
    if dx.abs() >= dy.abs() {
        Point::new(free.x, anchor.y)
    } else {
        Point::new(anchor.x, free.y)
    }
}

/// Rounds to the nearest grid intersection; non-positive spacing disables it.
pub fn snap_to_grid(p: Point, spacing: f64) -> Point {
    if spacing <= 0.0 {
        return p;
    }
    Point::new(
        (p.x / spacing).round() * spacing,
        (p.y / spacing).round() * spacing,
    )
}

/// Snapping behaviour for the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapOptions {
    /// Line snap radius in canvas units.
    pub tolerance: f64,
    /// Angle increment; 0 disables angle snapping.
    pub angle_step_deg: f64,
    /// Grid spacing; 0 disables grid snapping.
    pub grid_spacing: f64,
    /// Force horizontal/vertical segments.
    pub orthogonal: bool,
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            tolerance: 200.0,
            angle_step_deg: DEFAULT_ANGLE_STEP_DEG,
            grid_spacing: 0.0,
            orthogonal: false,
        }
    }
}

/// Which rule produced a snapped point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "rule")]
pub enum SnapKind {
    Line { hit: SnapHit },
    Orthogonal,
    Angle,
    Grid,
    Free,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    pub point: Point,
    pub kind: SnapKind,
}

/// Applies the snap rules in priority order: existing geometry, then
/// orthogonal/angle constraints relative to the anchor, then the grid.
#[derive(Debug, Clone, Default)]
pub struct SnapEngine {
    options: SnapOptions,
}

impl SnapEngine {
    pub fn new(options: SnapOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    /// Resolves the position for a point being placed at `p`.
    ///
    /// `anchor` is the fixed end of the segment being drawn, if any.
    pub fn resolve(&self, p: Point, anchor: Option<Point>, lines: &[Line]) -> SnapResult {
        if let Some(hit) = find_snap_on_lines(p, lines, self.options.tolerance) {
            return SnapResult {
                point: hit.point,
                kind: SnapKind::Line { hit },
            };
        }

        if let Some(anchor) = anchor {
            if self.options.orthogonal {
                return SnapResult {
                    point: snap_orthogonal(anchor, p),
                    kind: SnapKind::Orthogonal,
                };
            }
            if self.options.angle_step_deg > 0.0 && !p.approx_eq(&anchor, f64::EPSILON) {
                return SnapResult {
                    point: snap_angle(anchor, p, self.options.angle_step_deg),
                    kind: SnapKind::Angle,
                };
            }
        }

        if self.options.grid_spacing > 0.0 {
            return SnapResult {
                point: snap_to_grid(p, self.options.grid_spacing),
                kind: SnapKind::Grid,
            };
        }

        SnapResult {
            point: p,
            kind: SnapKind::Free,
        }
    }
}
