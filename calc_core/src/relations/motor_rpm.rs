//! # Synchronous Motor Speed
//!
//! ```text
//! RPM = 120 × Hz ÷ poles
//! ```

use super::{Computed, Operands, Rearrangement, Relation, RelationId, VariableSpec};
use crate::errors::SolveOutcome;
use crate::units::Unit;

pub const RPM: &str = "rpm";
pub const FREQUENCY: &str = "frequency";
pub const POLES: &str = "poles";

/// Seconds per minute × 2 poles per pole pair
const SYNC_FACTOR: f64 = 120.0;

pub static RELATION: Relation = Relation {
    id: RelationId::MotorRpm,
    variables: &[
        VariableSpec::decimal(RPM, "Motor speed", Unit::Rpm, 1),
        VariableSpec::decimal(FREQUENCY, "Frequency", Unit::Hertz, 2),
        VariableSpec::decimal(POLES, "Poles", Unit::Poles, 1),
    ],
    required_known: 2,
    rearrangements: &[
        Rearrangement {
            targets: &[RPM],
            formula: "RPM = 120 × Hz ÷ poles",
            nonzero: &[POLES],
            evaluate: rpm,
        },
        Rearrangement {
            targets: &[FREQUENCY],
            formula: "Hz = RPM × poles ÷ 120",
            nonzero: &[],
            evaluate: frequency,
        },
        Rearrangement {
            targets: &[POLES],
            formula: "poles = 120 × Hz ÷ RPM",
            nonzero: &[RPM],
            evaluate: poles,
        },
    ],
};

fn rpm(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let value = SYNC_FACTOR * ops.get(FREQUENCY) / ops.get(POLES);
    Ok(vec![Computed::new(
        value,
        format!("120 × {} ÷ {}", ops.show(FREQUENCY), ops.show(POLES)),
    )])
}

fn frequency(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let value = ops.get(RPM) * ops.get(POLES) / SYNC_FACTOR;
    Ok(vec![Computed::new(
        value,
        format!("{} × {} ÷ 120", ops.show(RPM), ops.show(POLES)),
    )])
}

fn poles(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let value = SYNC_FACTOR * ops.get(FREQUENCY) / ops.get(RPM);
    Ok(vec![Computed::new(
        value,
        format!("120 × {} ÷ {}", ops.show(FREQUENCY), ops.show(RPM)),
    )])
}
