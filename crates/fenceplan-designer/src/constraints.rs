//! Edge length constraints for outline editing.
//!
//! Edge `i` runs from vertex `i` to vertex `i + 1` (wrapping). A locked edge
//! keeps its pinned length while neighbouring vertices are dragged.

use crate::geometry::Point;
use crate::model::EdgeConstraint;
use tracing::debug;

/// Length of every edge of a closed outline.
pub fn edge_lengths(polygon: &[Point]) -> Vec<f64> {
    let n = polygon.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .map(|i| polygon[i].distance_to(&polygon[(i + 1) % n]))
        .collect()
}

/// Resizes edge `edge` to `length` by sliding its end vertex along the edge.
///
/// Returns `None` when the edge does not exist, has no direction, or the
/// length is not positive.
pub fn set_edge_length(polygon: &[Point], edge: usize, length: f64) -> Option<Vec<Point>> {
    let n = polygon.len();
    if n < 2 || edge >= n || !(length > 0.0) {
        return None;
    }
    let start = polygon[edge];
    let end_index = (edge + 1) % n;
    let dir = (polygon[end_index] - start).normalized()?;

    let mut out = polygon.to_vec();
    out[end_index] = start + dir * length;
    Some(out)
}

/// Moves vertex `index` towards `target`, honouring locked neighbouring edges.
///
/// With one locked neighbour the vertex lands on the circle of the pinned
/// length around the fixed neighbour, in the direction of `target`. With
/// both neighbours locked the move is rejected and the outline returned
/// unchanged.
pub fn move_vertex(
    polygon: &[Point],
    constraints: &[EdgeConstraint],
    index: usize,
    target: Point,
) -> Vec<Point> {
    let n = polygon.len();
    let mut out = polygon.to_vec();
    if n < 2 || index >= n {
        return out;
    }

    let incoming_edge = (index + n - 1) % n;
    let outgoing_edge = index;
    let lock_of = |edge: usize| constraints.get(edge).and_then(EdgeConstraint::locked_length);

    let new_pos = match (lock_of(incoming_edge), lock_of(outgoing_edge)) {
        (None, None) => Some(target),
        (Some(len), None) => pin_to_circle(polygon[incoming_edge], target, len),
        (None, Some(len)) => pin_to_circle(polygon[(index + 1) % n], target, len),
        (Some(_), Some(_)) => {
            debug!(index, "vertex between two locked edges cannot move");
            return out;
        }
    };

    if let Some(pos) = new_pos {
        out[index] = pos;
    }
    out
}

fn pin_to_circle(center: Point, target: Point, radius: f64) -> Option<Point> {
    let dir = (target - center).normalized()?;
    Some(center + dir * radius)
}
