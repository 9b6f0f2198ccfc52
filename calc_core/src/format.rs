//! # Result Formatting
//!
//! Rendering rules shared by every relation:
//!
//! - Integral values render without decimals (`1800`, not `1800.0`)
//! - Other values render to the target's fixed precision (`223.71`)
//! - Divider counts render as 4-digit uppercase hex (`010B`)
//! - Operands echoed into a derivation trace use the shortest exact form
//!   (`0.4`, `1457`), so the trace can be re-typed into a calculator
//!
//! ## Example
//!
//! ```rust
//! use calc_core::format::{format_fixed, format_operand};
//!
//! assert_eq!(format_fixed(1800.0, 1), "1800");
//! assert_eq!(format_fixed(266.6666, 2), "266.67");
//! assert_eq!(format_operand(0.4), "0.4");
//! ```

use serde::{Deserialize, Serialize};

/// Display precision of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precision {
    /// Fixed number of decimals for non-integral values
    Decimals(u8),
    /// Rounded integer shown as 4-digit uppercase hex
    Hex4,
}

impl Precision {
    /// Render a value according to this precision.
    ///
    /// Returns `None` when the value cannot be shown: `Hex4` values that do
    /// not fit an unsigned 16-bit register, or decimals that overflow when
    /// scaled.
    pub fn render(&self, value: f64) -> Option<String> {
        match *self {
            Precision::Decimals(decimals) if round_to(value, decimals).is_finite() => {
                Some(format_fixed(value, decimals))
            }
            Precision::Decimals(_) => None,
            Precision::Hex4 => to_register(value).map(|v| format!("{:04X}", v)),
        }
    }
}

/// Format with `decimals` places, dropping the fraction when the rounded
/// value is integral.
pub fn format_fixed(value: f64, decimals: u8) -> String {
    let rounded = round_to(value, decimals);
    if rounded.fract() == 0.0 {
        format_operand(rounded)
    } else {
        format!("{:.*}", decimals as usize, rounded)
    }
}

/// Shortest exact rendering of an operand (`-0` prints as `0`).
pub fn format_operand(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// Round on the scaled value: `round(value × 10^decimals) / 10^decimals`.
///
/// Scaling first keeps results like `142.7 - 90` at `52.7` instead of
/// `52.699999999999996`.
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let scale = 10f64.powi(i32::from(decimals));
    (value * scale).round() / scale
}

/// Round to the nearest integer and check it fits a 16-bit register.
pub fn to_register(value: f64) -> Option<u16> {
    let rounded = value.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > f64::from(u16::MAX) {
        return None;
    }
    Some(rounded as u16)
}

/// Split a register value into `(high, low)` bytes rendered as 2-digit hex.
///
/// ```rust
/// use calc_core::format::register_bytes;
///
/// assert_eq!(register_bytes(0x010B), ("01".to_string(), "0B".to_string()));
/// ```
pub fn register_bytes(value: u16) -> (String, String) {
    let high = (value >> 8) & 0xFF;
    let low = value & 0xFF;
    (format!("{:02X}", high), format!("{:02X}", low))
}

/// Snap values with magnitude below `epsilon` to exactly zero.
pub fn snap_to_zero(value: f64, epsilon: f64) -> f64 {
    if value.abs() < epsilon {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed_integral() {
        assert_eq!(format_fixed(400.0, 1), "400");
        assert_eq!(format_fixed(2.9999999, 2), "3");
        assert_eq!(format_fixed(-0.0, 2), "0");
    }

    #[test]
    fn test_format_fixed_fractional() {
        assert_eq!(format_fixed(10.0 * 22.371, 2), "223.71");
        assert_eq!(format_fixed(1.23456, 3), "1.235");
        assert_eq!(format_fixed(85.1234, 2), "85.12");
    }

    #[test]
    fn test_round_to_scaled() {
        assert_eq!(round_to(142.7 - 90.0, 1), 52.7);
        assert_eq!(round_to(314.96, 1), 315.0);
    }

    #[test]
    fn test_hex4_render() {
        assert_eq!(Precision::Hex4.render(266.67), Some("010B".to_string()));
        assert_eq!(Precision::Hex4.render(65535.0), Some("FFFF".to_string()));
        assert_eq!(Precision::Hex4.render(65536.0), None);
        assert_eq!(Precision::Hex4.render(-1.0), None);
    }

    #[test]
    fn test_register_bytes() {
        assert_eq!(register_bytes(0xABCD), ("AB".to_string(), "CD".to_string()));
        assert_eq!(register_bytes(0x0007), ("00".to_string(), "07".to_string()));
    }

    #[test]
    fn test_snap_to_zero() {
        assert_eq!(snap_to_zero(4e-7, 1e-6), 0.0);
        assert_eq!(snap_to_zero(-4e-7, 1e-6), 0.0);
        assert_eq!(snap_to_zero(0.5, 1e-6), 0.5);
    }
}
