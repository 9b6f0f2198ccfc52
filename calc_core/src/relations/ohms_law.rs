//! # Ohm's Law with Power
//!
//! Voltage, current, resistance and power are tied by two laws:
//!
//! ```text
//! V = A × R        W = V × A
//! ```
//!
//! Any two of the four determine the other two, so this relation is solved
//! in pairs: exactly two values must be given and both unknowns come back
//! together. The resistance/power pair needs square roots.
//!
//! Results with magnitude below 1e-6 are shown as 0.

use super::{Computed, Operands, Rearrangement, Relation, RelationId, VariableSpec};
use crate::errors::{SolveError, SolveOutcome};
use crate::format::snap_to_zero;
use crate::units::Unit;

pub const VOLTAGE: &str = "voltage";
pub const CURRENT: &str = "current";
pub const RESISTANCE: &str = "resistance";
pub const POWER: &str = "power";

const SNAP_EPSILON: f64 = 1e-6;

pub static RELATION: Relation = Relation {
    id: RelationId::OhmsLaw,
    variables: &[
        VariableSpec::decimal(VOLTAGE, "Voltage", Unit::Volt, 2),
        VariableSpec::decimal(CURRENT, "Current", Unit::Ampere, 2),
        VariableSpec::decimal(RESISTANCE, "Resistance", Unit::Ohm, 2),
        VariableSpec::decimal(POWER, "Power", Unit::Watt, 2),
    ],
    required_known: 2,
    rearrangements: &[
        Rearrangement {
            targets: &[RESISTANCE, POWER],
            formula: "R = V ÷ A, W = V × A",
            nonzero: &[CURRENT],
            evaluate: from_voltage_current,
        },
        Rearrangement {
            targets: &[CURRENT, POWER],
            formula: "A = V ÷ R, W = V² ÷ R",
            nonzero: &[RESISTANCE],
            evaluate: from_voltage_resistance,
        },
        Rearrangement {
            targets: &[CURRENT, RESISTANCE],
            formula: "A = W ÷ V, R = V² ÷ W",
            nonzero: &[VOLTAGE, POWER],
            evaluate: from_voltage_power,
        },
        Rearrangement {
            targets: &[VOLTAGE, POWER],
            formula: "V = A × R, W = A² × R",
            nonzero: &[],
            evaluate: from_current_resistance,
        },
        Rearrangement {
            targets: &[VOLTAGE, RESISTANCE],
            formula: "V = W ÷ A, R = W ÷ A²",
            nonzero: &[CURRENT],
            evaluate: from_current_power,
        },
        Rearrangement {
            targets: &[VOLTAGE, CURRENT],
            formula: "V = √(W × R), A = √(W ÷ R)",
            nonzero: &[RESISTANCE],
            evaluate: from_resistance_power,
        },
    ],
};

fn snapped(value: f64, substituted: String) -> Computed {
    Computed::new(snap_to_zero(value, SNAP_EPSILON), substituted)
}

fn checked_sqrt(target: &str, radicand: f64) -> SolveOutcome<f64> {
    if radicand < 0.0 {
        return Err(SolveError::negative_radicand(target, radicand));
    }
    Ok(radicand.sqrt())
}

fn from_voltage_current(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let (v, a) = (ops.get(VOLTAGE), ops.get(CURRENT));
    let (vs, as_) = (ops.show(VOLTAGE), ops.show(CURRENT));
    Ok(vec![
        snapped(v / a, format!("R = V ÷ A = {} ÷ {}", vs, as_)),
        snapped(v * a, format!("W = V × A = {} × {}", vs, as_)),
    ])
}

fn from_voltage_resistance(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let (v, r) = (ops.get(VOLTAGE), ops.get(RESISTANCE));
    let (vs, rs) = (ops.show(VOLTAGE), ops.show(RESISTANCE));
    Ok(vec![
        snapped(v / r, format!("A = V ÷ R = {} ÷ {}", vs, rs)),
        snapped(v * v / r, format!("W = V² ÷ R = {}² ÷ {}", vs, rs)),
    ])
}

fn from_voltage_power(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let (v, w) = (ops.get(VOLTAGE), ops.get(POWER));
    let (vs, ws) = (ops.show(VOLTAGE), ops.show(POWER));
    Ok(vec![
        snapped(w / v, format!("A = W ÷ V = {} ÷ {}", ws, vs)),
        snapped(v * v / w, format!("R = V² ÷ W = {}² ÷ {}", vs, ws)),
    ])
}

fn from_current_resistance(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let (a, r) = (ops.get(CURRENT), ops.get(RESISTANCE));
    let (as_, rs) = (ops.show(CURRENT), ops.show(RESISTANCE));
    Ok(vec![
        snapped(a * r, format!("V = A × R = {} × {}", as_, rs)),
        snapped(a * a * r, format!("W = A² × R = {}² × {}", as_, rs)),
    ])
}

fn from_current_power(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let (a, w) = (ops.get(CURRENT), ops.get(POWER));
    let (as_, ws) = (ops.show(CURRENT), ops.show(POWER));
    Ok(vec![
        snapped(w / a, format!("V = W ÷ A = {} ÷ {}", ws, as_)),
        snapped(w / (a * a), format!("R = W ÷ A² = {} ÷ {}²", ws, as_)),
    ])
}

fn from_resistance_power(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let (r, w) = (ops.get(RESISTANCE), ops.get(POWER));
    let (rs, ws) = (ops.show(RESISTANCE), ops.show(POWER));
    let voltage = checked_sqrt(VOLTAGE, w * r)?;
    let current = checked_sqrt(CURRENT, w / r)?;
    Ok(vec![
        snapped(voltage, format!("V = √(W × R) = √({} × {})", ws, rs)),
        snapped(current, format!("A = √(W ÷ R) = √({} ÷ {})", ws, rs)),
    ])
}
