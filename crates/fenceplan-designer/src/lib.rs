//! # Fenceplan Designer
//!
//! Geometry and drawing-model layer of the planner. Everything here works on
//! plain data: lines, posts, gates, outlines. Nothing touches a canvas or a
//! catalog.
//!
//! ## Core Components
//!
//! ### Drawing Model
//! - **Lines**: Fence runs between two points, with optional gate metadata
//! - **Posts**: End, corner, line and T posts derived from the geometry
//! - **Breaker Lines**: Axis-aligned splits of a deck outline
//! - **Edge Constraints**: Locked edge lengths for outline editing
//!
//! ### Operations
//! - **Snapping**: Endpoint-first line snapping, angle, orthogonal and grid
//! - **Offsets**: Miter offsets for picture frames and fascia
//! - **Posts and Spans**: Post placement and post-to-post spans along chains
//! - **Breakers**: Default breaker layout and drag snapping
//!
//! ## Architecture
//!
//! ```text
//! geometry (Point, projections, areas)
//!   └── model (Line, Post, Gate, BreakerLine, EdgeConstraint)
//!         ├── snapping
//!         ├── offset
//!         ├── constraints
//!         ├── topology (endpoint graph, chains)
//!         │     ├── posts
//!         │     └── spans
//!         └── breaker
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use fenceplan_designer::{find_snap_on_lines, Line, Point};
//!
//! let lines = vec![Line::new("run-1", Point::new(0.0, 0.0), Point::new(5000.0, 0.0))];
//! let hit = find_snap_on_lines(Point::new(4990.0, 30.0), &lines, 200.0).unwrap();
//! assert!(hit.is_endpoint());
//! ```

pub mod breaker;
pub mod constraints;
pub mod geometry;
pub mod model;
pub mod offset;
pub mod posts;
pub mod snapping;
pub mod spans;
pub mod topology;

pub use breaker::{board_runs, default_breaker_lines, snap_breaker_position};
pub use constraints::{edge_lengths, move_vertex, set_edge_length};
pub use geometry::{
    closest_point_on_segment, line_intersection, polygon_area, polygon_bounds,
    polygon_perimeter, signed_area, Axis, Bounds, Point, SegmentProjection,
};
pub use model::{
    BreakerLine, EdgeConstraint, EdgeMode, Gate, GateMetadata, GateType, Line, LineEnd, Polygon,
    Post, PostCategory, PostSource, SlidingReturnSide,
};
pub use offset::{
    fascia_outline, offset_polygon_miter, picture_frame, try_offset_polygon_miter, Frame,
    MiterStrip, OffsetDirection,
};
pub use posts::derive_posts;
pub use snapping::{
    find_snap_on_lines, snap_angle, snap_orthogonal, snap_to_grid, LineSnapTarget, SnapEngine,
    SnapHit, SnapKind, SnapOptions, SnapResult,
};
pub use spans::{derive_spans, Span};
pub use topology::{Chain, ChainLink, LineGraph, Vertex};
