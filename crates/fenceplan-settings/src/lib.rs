//! FencePlan Settings Crate
//!
//! Engine configuration: panel stock, snapping, deck layout and quote
//! settings, with JSON/TOML persistence and validation.

pub mod config;
pub mod error;

pub use config::{
    Config, DeckSettings, MeasurementSystem, PanelSettings, QuoteSection, SnappingSettings,
    CONFIG_FILE_NAME,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
