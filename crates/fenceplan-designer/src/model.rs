//! Drawing model: the records the editing surface hands to the planner.
//!
//! Field names serialize as camelCase so editor payloads load unchanged.

use crate::geometry::{Axis, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed outline; the last point connects back to the first.
pub type Polygon = Vec<Point>;

/// Gate and opening references attached to a line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GateMetadata {
    pub gate_ids: Vec<String>,
    pub opening_ids: Vec<String>,
}

impl GateMetadata {
    pub fn is_empty(&self) -> bool {
        self.gate_ids.is_empty() && self.opening_ids.is_empty()
    }
}

/// Which end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnd {
    A,
    B,
}

/// A straight fence run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: String,
    pub a: Point,
    pub b: Point,
    /// Run length in material units (mm). May differ from the canvas
    /// distance between `a` and `b` when the canvas is scaled.
    pub length: f64,
    #[serde(default)]
    pub locked_orthogonal: bool,
    #[serde(default)]
    pub even_spacing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_metadata: Option<GateMetadata>,
}

impl Line {
    /// Creates a line whose run length is the planar distance between its ends.
    pub fn new(id: impl Into<String>, a: Point, b: Point) -> Self {
        Self {
            id: id.into(),
            a,
            b,
            length: a.distance_to(&b),
            locked_orthogonal: false,
            even_spacing: false,
            gate_metadata: None,
        }
    }

    pub fn with_even_spacing(mut self, even_spacing: bool) -> Self {
        self.even_spacing = even_spacing;
        self
    }

    pub fn with_gate(mut self, gate_id: impl Into<String>) -> Self {
        self.gate_metadata
            .get_or_insert_with(GateMetadata::default)
            .gate_ids
            .push(gate_id.into());
        self
    }

    /// Lines carrying gates or openings must never be split mid-segment.
    pub fn is_non_mergeable(&self) -> bool {
        self.gate_metadata.as_ref().is_some_and(|m| !m.is_empty())
    }

    pub fn endpoint(&self, end: LineEnd) -> Point {
        match end {
            LineEnd::A => self.a,
            LineEnd::B => self.b,
        }
    }

    /// Canvas distance between the endpoints.
    pub fn geometric_length(&self) -> f64 {
        self.a.distance_to(&self.b)
    }

    /// Point at `offset` run units from `a`, measured in `length` units.
    pub fn point_at_offset(&self, offset: f64) -> Point {
        if self.length <= f64::EPSILON {
            return self.a;
        }
        self.a.lerp(&self.b, offset / self.length)
    }
}

/// Post category, derived from how many runs meet at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostCategory {
    End,
    Corner,
    Line,
    T,
}

impl fmt::Display for PostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::End => write!(f, "End"),
            Self::Corner => write!(f, "Corner"),
            Self::Line => write!(f, "Line"),
            Self::T => write!(f, "T"),
        }
    }
}

/// Where a post came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSource {
    /// A geometry vertex.
    Vertex,
    /// A computed panel boundary.
    Panel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub pos: Point,
    pub category: PostCategory,
    pub source: PostSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateType {
    Single,
    Double,
    Sliding,
    Pedestrian,
}

impl GateType {
    pub fn is_sliding(&self) -> bool {
        matches!(self, GateType::Sliding)
    }
}

impl fmt::Display for GateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "Single Swing"),
            Self::Double => write!(f, "Double Swing"),
            Self::Sliding => write!(f, "Sliding"),
            Self::Pedestrian => write!(f, "Pedestrian"),
        }
    }
}

/// Side a sliding gate retracts towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlidingReturnSide {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gate {
    pub id: String,
    #[serde(rename = "type")]
    pub gate_type: GateType,
    /// Opening width in run units (mm).
    pub opening_width: f64,
    pub run_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sliding_return_side: Option<SlidingReturnSide>,
}

/// Cross-board division line inside a deck outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakerLine {
    pub id: String,
    pub axis: Axis,
    pub pos: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMode {
    #[default]
    Free,
    Locked,
}

/// Pins a polygon edge's length during layout edits.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeConstraint {
    pub mode: EdgeMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

impl EdgeConstraint {
    pub fn free() -> Self {
        Self::default()
    }

    pub fn locked(length: f64) -> Self {
        Self {
            mode: EdgeMode::Locked,
            length: Some(length),
        }
    }

    /// The pinned length, if this edge is locked with a usable length.
    pub fn locked_length(&self) -> Option<f64> {
        match (self.mode, self.length) {
            (EdgeMode::Locked, Some(len)) if len > 0.0 => Some(len),
            _ => None,
        }
    }
}
