//! # Units
//!
//! The engine works on plain `f64` values, but every variable is tagged with
//! the unit it is entered and displayed in. Units are fixed per variable: no
//! conversion happens between them.
//!
//! ## Units in Use
//!
//! - Electrical: amperes (A), volts (V), ohms (Ω), watts (W), kilowatts (kW)
//! - Rotation: revolutions per minute (RPM), hertz (Hz), pole count (P)
//! - Travel: metres per minute (m/min), millimetres (mm)
//! - Encoder: pulses per revolution (PPR)
//! - Dimensionless: percent (%), ratios (`:1`), degrees (°), divider counts
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::Unit;
//!
//! assert_eq!(Unit::MetersPerMinute.symbol(), "m/min");
//! assert_eq!(Unit::Ratio.symbol(), ":1");
//! ```

use serde::{Deserialize, Serialize};

/// Unit attached to a relation variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Current in amperes
    Ampere,
    /// Potential in volts
    Volt,
    /// Resistance in ohms
    Ohm,
    /// Power in watts
    Watt,
    /// Power in kilowatts
    Kilowatt,
    /// Percentage of a rated value
    Percent,
    /// Rotational speed in revolutions per minute
    Rpm,
    /// Frequency in hertz
    Hertz,
    /// Motor pole count
    Poles,
    /// Car speed in metres per minute
    MetersPerMinute,
    /// Length in millimetres
    Millimeter,
    /// Encoder pulses per revolution
    Ppr,
    /// Dimensionless reduction or roping ratio
    Ratio,
    /// Angle in degrees
    Degree,
    /// Raw device register count (no physical unit)
    Count,
    /// Phase-converter rating (vendor spec number)
    ConverterRating,
}

impl Unit {
    /// Short symbol for display next to a value
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Ampere => "A",
            Unit::Volt => "V",
            Unit::Ohm => "Ω",
            Unit::Watt => "W",
            Unit::Kilowatt => "kW",
            Unit::Percent => "%",
            Unit::Rpm => "RPM",
            Unit::Hertz => "Hz",
            Unit::Poles => "P",
            Unit::MetersPerMinute => "m/min",
            Unit::Millimeter => "mm",
            Unit::Ppr => "PPR",
            Unit::Ratio => ":1",
            Unit::Degree => "°",
            Unit::Count => "",
            Unit::ConverterRating => "",
        }
    }

    /// Long name used in generated documentation
    pub fn name(&self) -> &'static str {
        match self {
            Unit::Ampere => "amperes",
            Unit::Volt => "volts",
            Unit::Ohm => "ohms",
            Unit::Watt => "watts",
            Unit::Kilowatt => "kilowatts",
            Unit::Percent => "percent",
            Unit::Rpm => "revolutions per minute",
            Unit::Hertz => "hertz",
            Unit::Poles => "poles",
            Unit::MetersPerMinute => "metres per minute",
            Unit::Millimeter => "millimetres",
            Unit::Ppr => "pulses per revolution",
            Unit::Ratio => "ratio",
            Unit::Degree => "degrees",
            Unit::Count => "register count",
            Unit::ConverterRating => "converter rating",
        }
    }

    /// Append the unit symbol to a formatted value (`"400"` -> `"400 %"`).
    pub fn suffix(&self, formatted: &str) -> String {
        match self.symbol() {
            "" => formatted.to_string(),
            symbol => format!("{} {}", formatted, symbol),
        }
    }
}
