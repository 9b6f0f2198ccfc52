//! # Speed Profile (04-XX)
//!
//! Derives the inverter's multi-step speed parameters from the full-speed
//! frequency. Each step is the full-speed frequency divided by a divisor that
//! depends on the car's rated speed class.
//!
//! | Code  | Step                   | 30 m/min | 45 m/min | 60 m/min |
//! |-------|------------------------|----------|----------|----------|
//! | 04-01 | Start creep / re-level | 0        | 0        | 0        |
//! | 04-02 | Tail speed             | ÷ 15     | ÷ 22.5   | ÷ 30     |
//! | 04-03 | UPS run                | ÷ 6      | ÷ 9      | ÷ 12     |
//! | 04-04 | Low / manual speed     | ÷ 2      | ÷ 3      | ÷ 4      |
//! | 04-05 | Floor-reading speed    | ÷ 2      | ÷ 3      | ÷ 4      |
//! | 04-06 | Medium speed           | ÷ 1      | ÷ 1      | ÷ 1.15   |
//! | 04-07 | Full speed             | ÷ 1      | ÷ 1      | ÷ 1      |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::speed_profile::{calculate, RatedSpeedClass, SpeedProfileInput};
//!
//! let input = SpeedProfileInput {
//!     rated_speed: RatedSpeedClass::M60,
//!     frequency_hz: 60.0,
//! };
//! let result = calculate(&input).unwrap();
//!
//! assert_eq!(result.row("04-02").unwrap().formatted, "2");
//! assert_eq!(result.row("04-06").unwrap().formatted, "52.17");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::format::format_fixed;
use crate::parsing::parse_decimal;

/// Rated car speed class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatedSpeedClass {
    #[serde(rename = "30")]
    M30,
    #[serde(rename = "45")]
    M45,
    #[serde(rename = "60")]
    M60,
}

impl RatedSpeedClass {
    pub const ALL: [RatedSpeedClass; 3] = [
        RatedSpeedClass::M30,
        RatedSpeedClass::M45,
        RatedSpeedClass::M60,
    ];

    /// Rated speed in m/min
    pub fn meters_per_minute(&self) -> u32 {
        match self {
            RatedSpeedClass::M30 => 30,
            RatedSpeedClass::M45 => 45,
            RatedSpeedClass::M60 => 60,
        }
    }

    /// Parse "30", "45" or "60" (a trailing "m/min" is allowed)
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.trim().trim_end_matches("m/min").trim();
        Self::ALL
            .into_iter()
            .find(|class| digits == class.meters_per_minute().to_string())
    }

    /// Divisors for 04-02 through 04-07
    fn divisors(&self) -> [f64; 6] {
        match self {
            RatedSpeedClass::M30 => [15.0, 6.0, 2.0, 2.0, 1.0, 1.0],
            RatedSpeedClass::M45 => [22.5, 9.0, 3.0, 3.0, 1.0, 1.0],
            RatedSpeedClass::M60 => [30.0, 12.0, 4.0, 4.0, 1.15, 1.0],
        }
    }
}

impl fmt::Display for RatedSpeedClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m/min", self.meters_per_minute())
    }
}

const STEPS: [(&str, &str); 6] = [
    ("04-02", "Tail speed"),
    ("04-03", "UPS run"),
    ("04-04", "Low / manual speed"),
    ("04-05", "Floor-reading speed"),
    ("04-06", "Medium speed"),
    ("04-07", "Full speed"),
];

/// Input for the speed profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedProfileInput {
    /// Rated speed class of the car
    pub rated_speed: RatedSpeedClass,
    /// Full-speed frequency in Hz
    pub frequency_hz: f64,
}

impl SpeedProfileInput {
    pub fn validate(&self) -> CalcResult<()> {
        if !self.frequency_hz.is_finite() || self.frequency_hz < 0.0 {
            return Err(CalcError::invalid_input(
                "frequency_hz",
                self.frequency_hz.to_string(),
                "Frequency must be a non-negative number",
            ));
        }
        Ok(())
    }
}

/// One parameter of the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    /// Parameter code (e.g. "04-03")
    pub code: String,
    pub description: String,
    /// Frequency in Hz
    pub value: f64,
    /// Display text: integral without decimals, otherwise 2 decimals
    pub formatted: String,
}

/// Result of the speed profile calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedProfileResult {
    pub rated_speed: RatedSpeedClass,
    pub frequency_hz: f64,
    /// Rows 04-01 through 04-07, in order
    pub rows: Vec<ParameterRow>,
}

impl SpeedProfileResult {
    /// Look up a row by parameter code
    pub fn row(&self, code: &str) -> Option<&ParameterRow> {
        self.rows.iter().find(|r| r.code == code)
    }
}

/// Compute the 04-01 … 04-07 speed steps.
pub fn calculate(input: &SpeedProfileInput) -> CalcResult<SpeedProfileResult> {
    input.validate()?;

    let mut rows = Vec::with_capacity(STEPS.len() + 1);
    rows.push(ParameterRow {
        code: "04-01".to_string(),
        description: "Start creep / re-level".to_string(),
        value: 0.0,
        formatted: "0".to_string(),
    });

    for ((code, description), divisor) in STEPS.iter().zip(input.rated_speed.divisors()) {
        let value = input.frequency_hz / divisor;
        rows.push(ParameterRow {
            code: code.to_string(),
            description: description.to_string(),
            value,
            formatted: format_fixed(value, 2),
        });
    }

    Ok(SpeedProfileResult {
        rated_speed: input.rated_speed,
        frequency_hz: input.frequency_hz,
        rows,
    })
}

/// Profile from form text; blank or non-numeric frequency has no result.
pub fn profile_from_text(
    rated_speed: RatedSpeedClass,
    frequency: &str,
) -> Option<SpeedProfileResult> {
    let frequency_hz = parse_decimal(frequency)?;
    calculate(&SpeedProfileInput {
        rated_speed,
        frequency_hz,
    })
    .ok()
}
