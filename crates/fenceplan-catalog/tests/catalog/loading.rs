use crate::fixture::CATALOG_JSON;
use fenceplan_catalog::{Catalog, CatalogError};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CATALOG_JSON.as_bytes()).unwrap();

    let catalog = Catalog::load(file.path()).unwrap();
    assert_eq!(catalog.rows().len(), 10);
    assert!(catalog.report().is_clean());
}

#[test]
fn test_wrapped_layout() {
    let json = format!("{{\"rows\": {}}}", CATALOG_JSON);
    let catalog = Catalog::from_json_str(&json).unwrap();
    assert_eq!(catalog.rows().len(), 10);
}

#[test]
fn test_empty_file_rejected() {
    let file = NamedTempFile::new().unwrap();
    let err = Catalog::load(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::LoadError(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CatalogError::IoError(_)));
}

#[test]
fn test_malformed_json() {
    let err = Catalog::from_json_str("[{\"category\": \"fence\"}]").unwrap_err();
    assert!(matches!(err, CatalogError::SerializationError(_)));
}
