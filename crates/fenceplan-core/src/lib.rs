//! # FencePlan Core
//!
//! Core types and utilities shared by the FencePlan crates.
//! Provides the unified error type and measurement unit handling.

pub mod error;
pub mod units;

pub use error::{Error, GeometryError, InputError, Result};
pub use units::{format_dimension, format_length, MeasurementSystem};
