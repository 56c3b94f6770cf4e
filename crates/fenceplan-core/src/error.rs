//! Error handling for FencePlan
//!
//! Provides the error types shared by every layer of the planner:
//! - Geometry errors (degenerate input rejected at an API boundary)
//! - Input errors (malformed project records)
//!
//! The engine itself prefers `Option` and advisory warnings over errors;
//! these types cover the edges where data is loaded or validated.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Raised where a caller asked for a geometric result that cannot exist,
/// e.g. a miter offset of a collinear outline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Polygon has too few vertices to enclose an area
    #[error("Polygon needs at least 3 points, got {count}")]
    TooFewPoints {
        /// The number of points supplied.
        count: usize,
    },

    /// Polygon area is (near) zero
    #[error("Polygon is degenerate (area {area})")]
    DegenerateArea {
        /// The computed area.
        area: f64,
    },

    /// Offset could not be produced
    #[error("Offset by {distance} failed: {reason}")]
    OffsetFailed {
        /// The requested offset distance.
        distance: f64,
        /// Why the offset was rejected.
        reason: String,
    },
}

/// Input error type
///
/// Represents records from the editing UI that cannot be planned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// A record referenced an id that does not exist
    #[error("Unknown {kind} id: {id}")]
    UnknownId {
        /// The record kind ("line", "gate", ...).
        kind: String,
        /// The missing id.
        id: String,
    },

    /// A numeric field is out of range
    #[error("Invalid value for '{field}': {value}")]
    InvalidValue {
        /// The field name.
        field: String,
        /// The offending value, rendered.
        value: String,
    },

    /// Two ids collide
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId {
        /// The record kind.
        kind: String,
        /// The duplicated id.
        id: String,
    },
}

/// Main error type for FencePlan
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Input error
    #[error(transparent)]
    Input(#[from] InputError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is an input error
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Input(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
