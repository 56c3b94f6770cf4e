//! Catalog loading.
//!
//! A `Catalog` owns the pricing rows, the index built from them and the
//! validation report produced at load time.

use crate::error::{CatalogError, CatalogResult, ResolutionError};
use crate::index::PricingIndex;
use crate::model::{PricingRow, ProductSelection};
use crate::resolver::{Resolved, Resolver};
use crate::validation::{validate_catalog, ValidationReport};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Accepted file layouts: a bare array of rows, or `{"rows": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Rows(Vec<PricingRow>),
    Wrapped { rows: Vec<PricingRow> },
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    index: PricingIndex,
    report: ValidationReport,
}

impl Catalog {
    /// Validates and indexes `rows`.
    pub fn from_rows(rows: Vec<PricingRow>) -> Self {
        let report = validate_catalog(&rows);
        for finding in &report.findings {
            debug!(kind = %finding.kind, skus = ?finding.skus, "{}", finding.message);
        }
        if !report.is_clean() {
            warn!(findings = report.len(), "catalog has validation findings");
        }

        let index = PricingIndex::build(rows);
        info!(rows = index.len(), "catalog indexed");
        Self { index, report }
    }

    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let rows = match serde_json::from_str::<CatalogFile>(json)? {
            CatalogFile::Rows(rows) | CatalogFile::Wrapped { rows } => rows,
        };
        Ok(Self::from_rows(rows))
    }

    /// Loads a JSON catalog file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(CatalogError::LoadError(format!(
                "{} is empty",
                path.display()
            )));
        }
        info!(path = %path.display(), "loading catalog");
        Self::from_json_str(&content)
    }

    pub fn index(&self) -> &PricingIndex {
        &self.index
    }

    pub fn rows(&self) -> &[PricingRow] {
        self.index.rows()
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Resolver with the default strategy chain.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.index)
    }

    pub fn resolve(&self, selection: &ProductSelection) -> Result<Resolved, ResolutionError> {
        self.resolver().resolve(selection)
    }
}
