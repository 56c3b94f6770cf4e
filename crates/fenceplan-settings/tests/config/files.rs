use fenceplan_settings::{Config, ConfigError, MeasurementSystem, SettingsError};
use tempfile::tempdir;

fn customised() -> Config {
    let mut config = Config::default();
    config.panels.panel_length = 2400.0;
    config.panels.cut_buffer = 10.0;
    config.snapping.orthogonal = true;
    config.deck.max_board_length = 4800.0;
    config.quote.tax_rate = 0.15;
    config.measurement_system = MeasurementSystem::Imperial;
    config
}

#[test]
fn test_json_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");

    let config = customised();
    config.save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_toml_round_trip_creates_parent_dir() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = customised();
    config.save_to_file(&path).unwrap();
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[panels]\npanel_length = 1800.0\n").unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.panels.panel_length, 1800.0);
    assert_eq!(config.panels.cut_buffer, 300.0);
    assert_eq!(config.snapping.tolerance, 200.0);
    assert_eq!(config.quote.tax_rate, 0.10);
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"deck": {"board_width": -5.0}}"#).unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { ref key, .. } if key == "deck.board_width"));
}

#[test]
fn test_invalid_config_not_saved() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    let mut config = Config::default();
    config.panels.max_panels_per_run = 0;

    assert!(config.save_to_file(&path).is_err());
    assert!(!path.exists());
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let err = Config::default()
        .save_to_file(&dir.path().join("config.yaml"))
        .unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::UnsupportedFormat(ref ext)) if ext == "yaml"
    ));
}

#[test]
fn test_empty_and_missing_files() {
    let dir = tempdir().unwrap();
    let empty = dir.path().join("config.toml");
    std::fs::write(&empty, "  \n").unwrap();
    assert!(matches!(
        Config::load_from_file(&empty),
        Err(SettingsError::LoadError(_))
    ));

    let missing = dir.path().join("missing.toml");
    assert!(matches!(
        Config::load_from_file(&missing),
        Err(SettingsError::IoError(_))
    ));
    assert_eq!(Config::load_or_default(&missing).unwrap(), Config::default());
}

#[test]
fn test_malformed_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::JsonError(_))
    ));
}
