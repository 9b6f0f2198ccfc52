//! # Frequency Divider (E57E / E57F)
//!
//! The encoder feedback divider is written to the controller as a 16-bit hex
//! value split across two byte registers: E57F takes the high byte and E57E
//! the low byte.
//!
//! ```text
//! divider = (4096 × m/min × 1000) ÷ (RPM × PPR × 0.75)
//! ```
//!
//! ## Rules
//!
//! - Rated speed below 60 m/min is computed as 60 m/min
//! - Delta VL inverters take one tenth of the divider: the computed divider is
//!   divided by 10, and a known divider is multiplied by 10 before it is used
//!   to solve for speed, RPM or PPR
//! - The divider is entered and shown in hex; it is rounded to the nearest
//!   integer before conversion
//!
//! ## Example
//!
//! ```rust
//! use calc_core::relations::divider::{RELATION, RATED_SPEED, RPM, ENCODER_PPR};
//! use calc_core::solver::{solve, Auxiliary, SolveRequest};
//!
//! let request = SolveRequest::new()
//!     .with(RATED_SPEED, "45")
//!     .with(RPM, "1200")
//!     .with(ENCODER_PPR, "1024");
//!
//! let result = solve(&RELATION, &request).unwrap();
//! assert_eq!(result.formatted(), "010B");
//! assert!(matches!(result.auxiliary, Some(Auxiliary::RegisterBytes { .. })));
//! ```

use super::{Computed, Operands, Rearrangement, Relation, RelationId, VariableSpec};
use crate::errors::SolveOutcome;
use crate::format::Precision;
use crate::parsing::{Clamp, Encoding};
use crate::units::Unit;

pub const DIVIDER: &str = "divider";
pub const RATED_SPEED: &str = "rated_speed";
pub const RPM: &str = "rpm";
pub const ENCODER_PPR: &str = "encoder_ppr";

/// 64 × 64 counts per revolution of the divider reference
const COUNTS: f64 = 4096.0;
const METERS_TO_MM: f64 = 1000.0;
const DUTY: f64 = 0.75;
/// Delta VL inverters scale the divider by one tenth
const DELTA_VL_FACTOR: f64 = 10.0;
/// Slowest rated speed the formula accepts
pub const MIN_RATED_SPEED: f64 = 60.0;

pub static RELATION: Relation = Relation {
    id: RelationId::FrequencyDivider,
    variables: &[
        VariableSpec::decimal(DIVIDER, "Divider", Unit::Count, 0)
            .with_encoding(Encoding::Hexadecimal)
            .with_precision(Precision::Hex4)
            .with_registers("E57F", "E57E"),
        VariableSpec::decimal(RATED_SPEED, "Rated speed", Unit::MetersPerMinute, 2)
            .with_clamp(Clamp::AtLeast(MIN_RATED_SPEED)),
        VariableSpec::decimal(RPM, "Motor speed", Unit::Rpm, 1),
        VariableSpec::decimal(ENCODER_PPR, "Encoder", Unit::Ppr, 0),
    ],
    required_known: 3,
    rearrangements: &[
        Rearrangement {
            targets: &[DIVIDER],
            formula: "divider = (4096 × m/min × 1000) ÷ (RPM × PPR × 0.75) [÷ 10 on Delta VL]",
            nonzero: &[RPM, ENCODER_PPR],
            evaluate: divider,
        },
        Rearrangement {
            targets: &[RATED_SPEED],
            formula: "m/min = (divider × RPM × PPR × 0.75) ÷ (4096 × 1000) [Delta VL: divider ×10]",
            nonzero: &[],
            evaluate: rated_speed,
        },
        Rearrangement {
            targets: &[RPM],
            formula: "RPM = (4096 × m/min × 1000) ÷ (divider × PPR × 0.75) [Delta VL: divider ×10]",
            nonzero: &[DIVIDER, ENCODER_PPR],
            evaluate: rpm,
        },
        Rearrangement {
            targets: &[ENCODER_PPR],
            formula: "PPR = (4096 × m/min × 1000) ÷ (divider × RPM × 0.75) [Delta VL: divider ×10]",
            nonzero: &[DIVIDER, RPM],
            evaluate: encoder_ppr,
        },
    ],
};

/// Known divider in the units of the base formula, plus how to echo it.
fn effective_divider(ops: &Operands) -> (f64, String) {
    let divider = ops.get(DIVIDER);
    if ops.delta_vl_mode() {
        (divider * DELTA_VL_FACTOR, format!("({} × 10)", ops.show(DIVIDER)))
    } else {
        (divider, ops.show(DIVIDER))
    }
}

fn divider(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let raw = (COUNTS * ops.get(RATED_SPEED) * METERS_TO_MM)
        / (ops.get(RPM) * ops.get(ENCODER_PPR) * DUTY);
    let mut substituted = format!(
        "(4096 × {} × 1000) ÷ ({} × {} × 0.75)",
        ops.show(RATED_SPEED),
        ops.show(RPM),
        ops.show(ENCODER_PPR)
    );
    let value = if ops.delta_vl_mode() {
        substituted.push_str(" ÷ 10");
        raw / DELTA_VL_FACTOR
    } else {
        raw
    };
    Ok(vec![Computed::new(value, substituted)])
}

fn rated_speed(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let (divider, shown) = effective_divider(ops);
    let value = (divider * ops.get(RPM) * ops.get(ENCODER_PPR) * DUTY) / (COUNTS * METERS_TO_MM);
    Ok(vec![Computed::new(
        value,
        format!(
            "({} × {} × {} × 0.75) ÷ (4096 × 1000)",
            shown,
            ops.show(RPM),
            ops.show(ENCODER_PPR)
        ),
    )])
}

fn rpm(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let (divider, shown) = effective_divider(ops);
    let value =
        (COUNTS * ops.get(RATED_SPEED) * METERS_TO_MM) / (divider * ops.get(ENCODER_PPR) * DUTY);
    Ok(vec![Computed::new(
        value,
        format!(
            "(4096 × {} × 1000) ÷ ({} × {} × 0.75)",
            ops.show(RATED_SPEED),
            shown,
            ops.show(ENCODER_PPR)
        ),
    )])
}

fn encoder_ppr(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let (divider, shown) = effective_divider(ops);
    let value = (COUNTS * ops.get(RATED_SPEED) * METERS_TO_MM) / (divider * ops.get(RPM) * DUTY);
    Ok(vec![Computed::new(
        value,
        format!(
            "(4096 × {} × 1000) ÷ ({} × {} × 0.75)",
            ops.show(RATED_SPEED),
            shown,
            ops.show(RPM)
        ),
    )])
}
