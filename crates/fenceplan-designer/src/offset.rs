//! Miter offsetting of closed outlines.
//!
//! Picture-frame borders and fascia strips are built by shifting every edge
//! of an outline by a board width and intersecting neighbouring edges, which
//! gives sharp (mitered) corners. Inward and outward mean the same visual
//! thing for clockwise and counter-clockwise outlines.

use crate::geometry::{line_intersection, signed_area, Point};
use fenceplan_core::GeometryError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outlines with less area than this are treated as collinear.
const DEGENERATE_AREA: f64 = 1e-9;

/// An offset result smaller than this fraction of the source area has
/// collapsed.
const COLLAPSED_AREA_RATIO: f64 = 1e-6;

/// Which way to move the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetDirection {
    Inward,
    Outward,
}

/// Offsets `polygon` by `distance`, explaining any failure.
pub fn try_offset_polygon_miter(
    polygon: &[Point],
    distance: f64,
    direction: OffsetDirection,
) -> Result<Vec<Point>, GeometryError> {
    let n = polygon.len();
    if n < 3 {
        return Err(GeometryError::TooFewPoints { count: n });
    }

    let area = signed_area(polygon);
    if area.abs() <= DEGENERATE_AREA {
        return Err(GeometryError::DegenerateArea { area });
    }

    let orientation = area.signum();
    let sign = match direction {
        OffsetDirection::Inward => -orientation,
        OffsetDirection::Outward => orientation,
    };

    // (point on offset edge, edge direction)
    let mut offset_edges = Vec::with_capacity(n);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let dir = b - a;
        let normal = dir.perp_right().normalized().ok_or_else(|| GeometryError::OffsetFailed {
            distance,
            reason: format!("edge {} has zero length", i),
        })?;
        offset_edges.push((a + normal * (sign * distance), dir));
    }

    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let (p_prev, d_prev) = offset_edges[(i + n - 1) % n];
        let (p_cur, d_cur) = offset_edges[i];
        let corner = line_intersection(p_prev, d_prev, p_cur, d_cur).ok_or_else(|| {
            GeometryError::OffsetFailed {
                distance,
                reason: format!("edges meeting at vertex {} are parallel", i),
            }
        })?;
        result.push(corner);
    }

    let result_area = signed_area(&result);
    if result_area.abs() <= area.abs() * COLLAPSED_AREA_RATIO || result_area.signum() != orientation {
        debug!(distance, area, result_area, "offset collapsed the outline");
        return Err(GeometryError::OffsetFailed {
            distance,
            reason: "offset collapsed the outline".to_string(),
        });
    }

    Ok(result)
}

/// Miter offset of a closed outline.
///
/// Returns `None` for fewer than three points, zero-area outlines, parallel
/// neighbouring edges, and offsets that eat the whole shape.
pub fn offset_polygon_miter(
    polygon: &[Point],
    distance: f64,
    direction: OffsetDirection,
) -> Option<Vec<Point>> {
    try_offset_polygon_miter(polygon, distance, direction).ok()
}

/// One mitered board of a frame: a trapezoid between an outer and an inner
/// edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiterStrip {
    pub edge_index: usize,
    pub outer_a: Point,
    pub outer_b: Point,
    pub inner_b: Point,
    pub inner_a: Point,
}

impl MiterStrip {
    /// Length along the outer edge.
    pub fn outer_length(&self) -> f64 {
        self.outer_a.distance_to(&self.outer_b)
    }

    /// Length along the inner edge.
    pub fn inner_length(&self) -> f64 {
        self.inner_a.distance_to(&self.inner_b)
    }

    /// Long-point length to cut the board at.
    pub fn cut_length(&self) -> f64 {
        self.outer_length().max(self.inner_length())
    }

    pub fn outline(&self) -> Vec<Point> {
        vec![self.outer_a, self.outer_b, self.inner_b, self.inner_a]
    }
}

/// A band of mitered boards between two parallel outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub outer: Vec<Point>,
    pub inner: Vec<Point>,
    pub strips: Vec<MiterStrip>,
}

impl Frame {
    /// Pairs up corresponding vertices of two outlines of equal length.
    fn between(outer: Vec<Point>, inner: Vec<Point>) -> Self {
        let n = outer.len();
        let strips = (0..n)
            .map(|i| {
                let j = (i + 1) % n;
                MiterStrip {
                    edge_index: i,
                    outer_a: outer[i],
                    outer_b: outer[j],
                    inner_b: inner[j],
                    inner_a: inner[i],
                }
            })
            .collect();
        Self {
            outer,
            inner,
            strips,
        }
    }

    /// Sum of the boards' cut lengths.
    pub fn total_cut_length(&self) -> f64 {
        self.strips.iter().map(MiterStrip::cut_length).sum()
    }
}

/// Picture-frame border: boards of `board_width` mitered inside `outline`.
pub fn picture_frame(outline: &[Point], board_width: f64) -> Option<Frame> {
    let inner = offset_polygon_miter(outline, board_width, OffsetDirection::Inward)?;
    Some(Frame::between(outline.to_vec(), inner))
}

/// Fascia strip: boards of `thickness` mitered around the outside of `outline`.
pub fn fascia_outline(outline: &[Point], thickness: f64) -> Option<Frame> {
    let outer = offset_polygon_miter(outline, thickness, OffsetDirection::Outward)?;
    Some(Frame::between(outer, outline.to_vec()))
}
