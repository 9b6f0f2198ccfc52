//! # Current Limit (06-11)
//!
//! The inverter's current limit parameter is the motor's rated current as a
//! share of the inverter's rated current, scaled so that 200 means "motor
//! current equals inverter current":
//!
//! ```text
//! limit % = (motor A ÷ inverter A) × 200
//! ```
//!
//! 06-11 is an integer setting, so a solved limit is shown rounded to a whole
//! percent with the rounding step in the trace.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::relations::current_limit::{RELATION, MOTOR_CURRENT, INVERTER_CURRENT};
//! use calc_core::solver::{solve, SolveRequest};
//!
//! let request = SolveRequest::new()
//!     .with(MOTOR_CURRENT, "10")
//!     .with(INVERTER_CURRENT, "5");
//!
//! let result = solve(&RELATION, &request).unwrap();
//! assert_eq!(result.formatted(), "400");
//! ```

use super::{Computed, Operands, Rearrangement, Relation, RelationId, VariableSpec};
use crate::errors::SolveOutcome;
use crate::units::Unit;

pub const MOTOR_CURRENT: &str = "motor_current";
pub const INVERTER_CURRENT: &str = "inverter_current";
pub const CURRENT_LIMIT: &str = "current_limit";

/// Parameter 06-11 scale: 200 % at motor current = inverter current
const LIMIT_SCALE: f64 = 200.0;

pub static RELATION: Relation = Relation {
    id: RelationId::CurrentLimit,
    variables: &[
        VariableSpec::decimal(MOTOR_CURRENT, "Motor rated current", Unit::Ampere, 1),
        VariableSpec::decimal(INVERTER_CURRENT, "Inverter rated current", Unit::Ampere, 1),
        VariableSpec::decimal(CURRENT_LIMIT, "Current limit (06-11)", Unit::Percent, 0),
    ],
    required_known: 2,
    rearrangements: &[
        Rearrangement {
            targets: &[CURRENT_LIMIT],
            formula: "limit % = (motor A ÷ inverter A) × 200",
            nonzero: &[INVERTER_CURRENT],
            evaluate: limit,
        },
        Rearrangement {
            targets: &[MOTOR_CURRENT],
            formula: "motor A = (limit % ÷ 200) × inverter A",
            nonzero: &[],
            evaluate: motor,
        },
        Rearrangement {
            targets: &[INVERTER_CURRENT],
            formula: "inverter A = (motor A × 200) ÷ limit %",
            nonzero: &[CURRENT_LIMIT],
            evaluate: inverter,
        },
    ],
};

fn limit(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let value = ops.get(MOTOR_CURRENT) / ops.get(INVERTER_CURRENT) * LIMIT_SCALE;
    Ok(vec![Computed::new(
        value,
        format!("({} A ÷ {} A) × 200", ops.show(MOTOR_CURRENT), ops.show(INVERTER_CURRENT)),
    )])
}

fn motor(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let value = ops.get(CURRENT_LIMIT) / LIMIT_SCALE * ops.get(INVERTER_CURRENT);
    Ok(vec![Computed::new(
        value,
        format!("({} % ÷ 200) × {} A", ops.show(CURRENT_LIMIT), ops.show(INVERTER_CURRENT)),
    )])
}

fn inverter(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let value = ops.get(MOTOR_CURRENT) * LIMIT_SCALE / ops.get(CURRENT_LIMIT);
    Ok(vec![Computed::new(
        value,
        format!("({} A × 200) ÷ {} %", ops.show(MOTOR_CURRENT), ops.show(CURRENT_LIMIT)),
    )])
}
