//! Unit conversion utilities
//!
//! Handles conversion between Metric (mm/m) and Imperial (feet/inch) systems.
//! Engine values are always millimetres; these helpers are for the edges
//! where lengths are shown to a customer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Millimetres per foot.
pub const MM_PER_FOOT: f64 = 304.8;

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (feet and inches)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

/// Format a dimension without trailing zeros ("2390", "4.8", "0.125").
///
/// Used wherever a number becomes part of an identifier, so the same value
/// always renders the same way.
pub fn format_dimension(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let text = format!("{:.3}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Format length value for display
///
/// * `value_mm` - Value in millimeters
/// * `system` - Target measurement system
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => {
            if value_mm.abs() >= 1000.0 {
                format!("{:.3} m", value_mm / 1000.0)
            } else {
                format!("{:.0} mm", value_mm)
            }
        }
        MeasurementSystem::Imperial => {
            let sign = if value_mm < 0.0 { "-" } else { "" };
            let total_inches = value_mm.abs() / MM_PER_INCH;
            let mut feet = (total_inches / 12.0).floor();
            let mut inches = total_inches - feet * 12.0;
            // 11.96" would print as 12.0"
            if inches >= 11.95 {
                feet += 1.0;
                inches = 0.0;
            }
            format!("{}{}' {:.1}\"", sign, feet, inches)
        }
    }
}
