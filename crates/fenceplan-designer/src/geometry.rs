//! Geometry primitives for the planner.
//!
//! Points double as 2D vectors. Polygons are plain point sequences that are
//! implicitly closed (the last point connects back to the first).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Relative threshold under which two directions count as parallel.
pub const PARALLEL_EPSILON: f64 = 1e-9;

/// Represents a 2D point with X and Y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point with the given X and Y coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_sq_to(other).sqrt()
    }

    /// Squared distance to another point.
    pub fn distance_sq_to(&self, other: &Point) -> f64 {
        (self.x - other.x).powi(2) + (self.y - other.y).powi(2)
    }

    /// Length when treated as a vector.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Linear interpolation towards `other`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    pub fn normalized(&self) -> Option<Point> {
        let len = self.length();
        if len <= f64::EPSILON {
            None
        } else {
            Some(Point::new(self.x / len, self.y / len))
        }
    }

    /// Vector rotated 90 degrees clockwise (right-hand normal in y-up space).
    pub fn perp_right(&self) -> Point {
        Point::new(self.y, -self.x)
    }

    /// True when both coordinates are within `eps` of `other`.
    pub fn approx_eq(&self, other: &Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

/// Coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Picks this axis' coordinate out of a point.
    pub fn coord(&self, p: &Point) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    /// The perpendicular axis.
    pub fn other(&self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Result of projecting a point onto a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Closest point on the segment.
    pub point: Point,
    /// Projection parameter, clamped to [0, 1].
    pub t: f64,
    /// Squared distance from the query point to `point`.
    pub distance_sq: f64,
}

impl SegmentProjection {
    pub fn distance(&self) -> f64 {
        self.distance_sq.sqrt()
    }
}

/// Projects `p` onto segment `ab`, clamping to the segment.
///
/// A degenerate segment (`a == b`) projects everything onto `a` with `t = 0`.
pub fn closest_point_on_segment(p: Point, a: Point, b: Point) -> SegmentProjection {
    let ab = b - a;
    let len_sq = ab.dot(&ab);
    if len_sq <= f64::EPSILON {
        return SegmentProjection {
            point: a,
            t: 0.0,
            distance_sq: p.distance_sq_to(&a),
        };
    }

    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let point = a + ab * t;
    SegmentProjection {
        point,
        t,
        distance_sq: p.distance_sq_to(&point),
    }
}

/// Intersects the infinite lines `p1 + s*d1` and `p2 + t*d2`.
///
/// Returns `None` when the determinant of the directions is (relatively)
/// zero, i.e. the lines are parallel or a direction is degenerate.
pub fn line_intersection(p1: Point, d1: Point, p2: Point, d2: Point) -> Option<Point> {
    let det = d1.cross(&d2);
    let scale = d1.length() * d2.length();
    if scale <= f64::EPSILON || det.abs() <= PARALLEL_EPSILON * scale {
        return None;
    }
    let s = (p2 - p1).cross(&d2) / det;
    Some(p1 + d1 * s)
}

/// Axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Minimum coordinate along `axis`.
    pub fn min_on(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.min_x,
            Axis::Y => self.min_y,
        }
    }

    /// Maximum coordinate along `axis`.
    pub fn max_on(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.max_x,
            Axis::Y => self.max_y,
        }
    }
}

/// Bounds of a point set, `None` when empty.
pub fn polygon_bounds(points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let init = Bounds {
        min_x: first.x,
        min_y: first.y,
        max_x: first.x,
        max_y: first.y,
    };
    Some(points.iter().skip(1).fold(init, |b, p| Bounds {
        min_x: b.min_x.min(p.x),
        min_y: b.min_y.min(p.y),
        max_x: b.max_x.max(p.x),
        max_y: b.max_y.max(p.y),
    }))
}

/// Shoelace signed area; positive for counter-clockwise winding in y-up space.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    let twice: f64 = (0..n)
        .map(|i| points[i].cross(&points[(i + 1) % n]))
        .sum();
    twice / 2.0
}

pub fn polygon_area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// Closed perimeter length.
pub fn polygon_perimeter(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let n = points.len();
    (0..n)
        .map(|i| points[i].distance_to(&points[(i + 1) % n]))
        .sum()
}

/// Area centroid, `None` for degenerate polygons.
pub fn polygon_centroid(points: &[Point]) -> Option<Point> {
    let area = signed_area(points);
    if area.abs() <= f64::EPSILON {
        return None;
    }
    let n = points.len();
    let (cx, cy) = (0..n).fold((0.0, 0.0), |(cx, cy), i| {
        let p = points[i];
        let q = points[(i + 1) % n];
        let f = p.cross(&q);
        (cx + (p.x + q.x) * f, cy + (p.y + q.y) * f)
    });
    Some(Point::new(cx / (6.0 * area), cy / (6.0 * area)))
}

/// Polygon winding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Degenerate,
}

/// Winding of a polygon; areas within `eps` of zero are degenerate.
pub fn orientation(points: &[Point], eps: f64) -> Orientation {
    let area = signed_area(points);
    if area.abs() <= eps {
        Orientation::Degenerate
    } else if area > 0.0 {
        Orientation::CounterClockwise
    } else {
        Orientation::Clockwise
    }
}
