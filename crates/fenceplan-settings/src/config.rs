//! Engine configuration for FencePlan
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Panel stock (panel length, cut buffer, leftover threshold, run guard)
//! - Snapping (line tolerance, angle step, grid, orthogonal mode)
//! - Deck layout (board length and width, breaker margin and snap)
//! - Quote (tax rate)

use crate::error::{ConfigError, SettingsError, SettingsResult};
pub use fenceplan_core::MeasurementSystem;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name used under the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Panel stock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    /// Stock panel length in mm
    pub panel_length: f64,
    /// Material lost per cut in mm
    pub cut_buffer: f64,
    /// Shortest offcut kept as a leftover, in mm
    pub min_leftover: f64,
    /// Runs needing more panels than this are rejected
    pub max_panels_per_run: usize,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            panel_length: 2390.0,
            cut_buffer: 300.0,
            min_leftover: 300.0,
            max_panels_per_run: 500,
        }
    }
}

/// Snapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnappingSettings {
    /// Line snap radius
    pub tolerance: f64,
    /// Angle increment in degrees; 0 turns angle snapping off
    pub angle_step_deg: f64,
    /// Grid spacing; 0 turns grid snapping off
    pub grid_spacing: f64,
    pub orthogonal: bool,
}

impl Default for SnappingSettings {
    fn default() -> Self {
        Self {
            tolerance: 200.0,
            angle_step_deg: 15.0,
            grid_spacing: 0.0,
            orthogonal: false,
        }
    }
}

/// Deck layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckSettings {
    /// Longest board available, in mm
    pub max_board_length: f64,
    pub board_width: f64,
    /// Closest a breaker may sit to the outline edge
    pub breaker_margin: f64,
    /// Distance within which a dragged breaker snaps to an outline vertex
    pub breaker_snap_threshold: f64,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            max_board_length: 5400.0,
            board_width: 140.0,
            breaker_margin: 100.0,
            breaker_snap_threshold: 150.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteSection {
    /// Added on top of the priced total; 0.10 is 10%
    pub tax_rate: f64,
}

impl Default for QuoteSection {
    fn default() -> Self {
        Self { tax_rate: 0.10 }
    }
}

/// Complete engine configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Missing sections and fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Units used when printing lengths
    pub measurement_system: MeasurementSystem,
    pub panels: PanelSettings,
    pub snapping: SnappingSettings,
    pub deck: DeckSettings,
    pub quote: QuoteSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("none").to_string()).into()),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config location, e.g. `~/.config/fenceplan/config.toml`.
    pub fn default_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(base.join("fenceplan").join(CONFIG_FILE_NAME))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(SettingsError::LoadError(format!("{} is empty", path.display())));
        }

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `path` when it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| SettingsError::SaveError(e.to_string()))?
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
            }
        }
        std::fs::write(path, content)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let panels = &self.panels;
        positive("panels.panel_length", panels.panel_length)?;
        non_negative("panels.cut_buffer", panels.cut_buffer)?;
        non_negative("panels.min_leftover", panels.min_leftover)?;
        if panels.max_panels_per_run == 0 {
            return Err(invalid("panels.max_panels_per_run", "must be at least 1"));
        }

        let snapping = &self.snapping;
        positive("snapping.tolerance", snapping.tolerance)?;
        non_negative("snapping.angle_step_deg", snapping.angle_step_deg)?;
        non_negative("snapping.grid_spacing", snapping.grid_spacing)?;

        let deck = &self.deck;
        positive("deck.max_board_length", deck.max_board_length)?;
        positive("deck.board_width", deck.board_width)?;
        non_negative("deck.breaker_margin", deck.breaker_margin)?;
        non_negative("deck.breaker_snap_threshold", deck.breaker_snap_threshold)?;

        let tax = self.quote.tax_rate;
        if !(tax.is_finite() && (0.0..1.0).contains(&tax)) {
            return Err(invalid("quote.tax_rate", "must be in [0, 1)"));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(key, "must be > 0"))
    }
}

fn non_negative(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(key, "must be >= 0"))
    }
}
