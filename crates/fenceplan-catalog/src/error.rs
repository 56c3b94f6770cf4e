//! Error types for the catalog crate.
//!
//! Loading problems are `CatalogError`s. Per-selection pricing failures are
//! `ResolutionError`s, which carry enough context for the caller to render a
//! placeholder row and a useful diagnostic.

use crate::model::{ProductSelection, WidthRange};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use thiserror::Error;

/// Errors that can occur while loading a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog data could not be loaded.
    #[error("Failed to load catalog: {0}")]
    LoadError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON deserialization error.
    #[error("Catalog JSON error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for catalog loading.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Why a selection could not be priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionErrorKind {
    /// The catalog has no matching entry.
    MissingSku,
    /// The selection lacks a required field.
    InvalidInput,
    /// The SKU could not be built from the selection.
    SkuBuildFailed,
}

impl fmt::Display for ResolutionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSku => write!(f, "missing_sku"),
            Self::InvalidInput => write!(f, "invalid_input"),
            Self::SkuBuildFailed => write!(f, "sku_build_failed"),
        }
    }
}

/// A selection that could not be priced, with diagnostic context.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{kind}: {message}")]
pub struct ResolutionError {
    pub kind: ResolutionErrorKind,
    pub selection: ProductSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_sku: Option<String>,
    /// Catalog SKUs closest to the generated one.
    #[serde(default)]
    pub near_misses: Vec<String>,
    /// Brackets on offer for a sliding gate selection.
    #[serde(default)]
    pub width_ranges: Vec<WidthRange>,
    pub message: String,
}

impl ResolutionError {
    pub fn new(
        kind: ResolutionErrorKind,
        selection: &ProductSelection,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            selection: selection.clone(),
            generated_sku: None,
            near_misses: Vec::new(),
            width_ranges: Vec::new(),
            message: message.into(),
        }
    }

    pub fn missing(selection: &ProductSelection, message: impl Into<String>) -> Self {
        Self::new(ResolutionErrorKind::MissingSku, selection, message)
    }

    pub fn invalid_input(selection: &ProductSelection, message: impl Into<String>) -> Self {
        Self::new(ResolutionErrorKind::InvalidInput, selection, message)
    }

    pub fn with_generated_sku(mut self, sku: impl Into<String>) -> Self {
        self.generated_sku = Some(sku.into());
        self
    }

    pub fn with_width_ranges(mut self, ranges: Vec<WidthRange>) -> Self {
        self.width_ranges = ranges;
        self
    }

    /// A miss lets the next resolution strategy try; anything else is final.
    pub fn is_miss(&self) -> bool {
        self.kind == ResolutionErrorKind::MissingSku
    }

    /// Folds context from a later miss into this one, keeping what is
    /// already known.
    pub fn merge(&mut self, other: ResolutionError) {
        if self.generated_sku.is_none() {
            self.generated_sku = other.generated_sku;
        }
        if self.width_ranges.is_empty() {
            self.width_ranges = other.width_ranges;
        }
        if self.near_misses.is_empty() {
            self.near_misses = other.near_misses;
        }
    }
}
