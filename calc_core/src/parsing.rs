//! # Value Parsing & Normalization
//!
//! Converts raw text fields into numbers. Every function here returns
//! `Option<f64>`: `None` means "absent", which the solver treats the same as an
//! empty field. Nothing in this module fails loudly, because half-typed input
//! is the normal state of a form.
//!
//! ## Encodings
//!
//! | Encoding | Accepted text | Example |
//! |----------|---------------|---------|
//! | Decimal | any finite number | `1457`, `0.4`, `-3.5` |
//! | Hexadecimal | hex digits, optional `0x` prefix or `H` suffix | `010B`, `0x10b`, `10BH` |
//! | Ratio | `A:B` (ASCII or full-width colon) or a bare number | `43:2`, `43：2`, `21.5` |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::parsing::{parse_value, Encoding};
//!
//! assert_eq!(parse_value("43：2", Encoding::Ratio), Some(21.5));
//! assert_eq!(parse_value("0x10B", Encoding::Hexadecimal), Some(267.0));
//! assert_eq!(parse_value("abc", Encoding::Decimal), None);
//! ```

use serde::{Deserialize, Serialize};

/// How a variable's raw text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// Plain decimal number
    Decimal,
    /// Hexadecimal integer (device register notation)
    Hexadecimal,
    /// `A:B` ratio or bare number
    Ratio,
}

impl Encoding {
    /// Display name for documentation
    pub fn display_name(&self) -> &'static str {
        match self {
            Encoding::Decimal => "decimal",
            Encoding::Hexadecimal => "hexadecimal",
            Encoding::Ratio => "ratio (A:B)",
        }
    }
}

/// Domain rule applied to a parsed value before any relation uses it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Clamp {
    /// Raise values below the bound to the bound
    AtLeast(f64),
}

impl Clamp {
    /// Apply the clamp, returning the value to use.
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            Clamp::AtLeast(min) => value.max(min),
        }
    }

    /// Human-readable description of the rule
    pub fn describe(&self) -> String {
        match self {
            Clamp::AtLeast(min) => format!("minimum {}", min),
        }
    }
}

/// Parse raw text with the given encoding.
///
/// Blank text is absent for every encoding.
pub fn parse_value(raw: &str, encoding: Encoding) -> Option<f64> {
    match encoding {
        Encoding::Decimal => parse_decimal(raw),
        Encoding::Hexadecimal => parse_hex(raw).map(|v| v as f64),
        Encoding::Ratio => parse_ratio(raw),
    }
}

/// Parse a decimal number. The whole trimmed text must be numeric.
///
/// ```rust
/// use calc_core::parsing::parse_decimal;
///
/// assert_eq!(parse_decimal(" 12.5 "), Some(12.5));
/// assert_eq!(parse_decimal("12abc"), None);
/// assert_eq!(parse_decimal("inf"), None);
/// ```
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a hexadecimal integer with optional `0x` prefix or `H` suffix.
///
/// ```rust
/// use calc_core::parsing::parse_hex;
///
/// assert_eq!(parse_hex("010B"), Some(267));
/// assert_eq!(parse_hex("0x10b"), Some(267));
/// assert_eq!(parse_hex("10Bh"), Some(267));
/// assert_eq!(parse_hex("0xZZ"), None);
/// ```
pub fn parse_hex(raw: &str) -> Option<u64> {
    let digits = strip_hex_markers(raw.trim()).unwrap_or_else(|| raw.trim());
    if digits.is_empty() || digits.len() > 16 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(digits, 16).ok()
}

/// Parse a ratio string (`43:2`, `43：2`) or a bare number.
///
/// A zero denominator yields `None` rather than infinity.
pub fn parse_ratio(raw: &str) -> Option<f64> {
    let normalized = normalize_colon(raw);
    match normalized.trim().split_once(':') {
        Some((numerator, denominator)) => {
            let numerator = parse_decimal(numerator)?;
            let denominator = parse_decimal(denominator)?;
            if denominator == 0.0 {
                None
            } else {
                Some(numerator / denominator).filter(|v| v.is_finite())
            }
        }
        None => parse_decimal(&normalized),
    }
}

/// Replace full-width colons with ASCII colons.
pub fn normalize_colon(raw: &str) -> String {
    raw.replace('：', ":")
}

/// Return the digits between explicit hex markers, or `None` when the text
/// carries no marker.
fn strip_hex_markers(text: &str) -> Option<&str> {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .or_else(|| text.strip_suffix('H'))
        .or_else(|| text.strip_suffix('h'))
}

// ============================================================================
// Quick Convert
// ============================================================================

/// Decimal/hex conversion offered by the search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickConversion {
    /// How the input text was interpreted
    pub interpreted_as: Encoding,
    /// Decimal value
    pub decimal: u64,
    /// Uppercase hex, zero-padded to at least 4 digits
    pub hex: String,
}

/// Interpret free text as either a decimal or a hex integer.
///
/// Text with `0x`/`H` markers is hex. Text made only of decimal digits is
/// decimal. Any other text made of hex digits is hex. Everything else is
/// not a number.
///
/// ```rust
/// use calc_core::parsing::{quick_convert, Encoding};
///
/// let conv = quick_convert("267").unwrap();
/// assert_eq!(conv.hex, "010B");
///
/// let conv = quick_convert("1F4").unwrap();
/// assert_eq!(conv.interpreted_as, Encoding::Hexadecimal);
/// assert_eq!(conv.decimal, 500);
///
/// assert!(quick_convert("RPM").is_none());
/// ```
pub fn quick_convert(raw: &str) -> Option<QuickConversion> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    let (interpreted_as, decimal) = if strip_hex_markers(text).is_some() {
        (Encoding::Hexadecimal, parse_hex(text)?)
    } else if text.chars().all(|c| c.is_ascii_digit()) {
        (Encoding::Decimal, text.parse::<u64>().ok()?)
    } else {
        (Encoding::Hexadecimal, parse_hex(text)?)
    };

    Some(QuickConversion {
        interpreted_as,
        decimal,
        hex: format!("{:04X}", decimal),
    })
}
