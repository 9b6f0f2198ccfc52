//! # Traction Machine Speed
//!
//! Car speed from motor speed, sheave diameter, gear reduction and roping:
//!
//! ```text
//! speed (m/min) = (RPM × 3.14 × (diameter mm ÷ 1000)) ÷ (gear × roping)
//! ```
//!
//! π is fixed at 3.14. Site documentation and controller manuals use that
//! value, so results must match it rather than the true constant.
//!
//! Gear and roping ratios accept `A:B` text (`43:2`, `2:1`, full-width colon
//! allowed) as well as bare numbers.

use super::{Computed, Operands, Rearrangement, Relation, RelationId, VariableSpec};
use crate::errors::SolveOutcome;
use crate::parsing::Encoding;
use crate::units::Unit;

pub const SPEED: &str = "speed";
pub const RPM: &str = "rpm";
pub const WHEEL_DIAMETER: &str = "wheel_diameter";
pub const GEAR_RATIO: &str = "gear_ratio";
pub const ROPING_RATIO: &str = "roping_ratio";

/// Site approximation of π
pub const PI_APPROX: f64 = 3.14;
const MM_PER_M: f64 = 1000.0;

pub static RELATION: Relation = Relation {
    id: RelationId::TractionSpeed,
    variables: &[
        VariableSpec::decimal(SPEED, "Car speed", Unit::MetersPerMinute, 2),
        VariableSpec::decimal(RPM, "Motor speed", Unit::Rpm, 1),
        VariableSpec::decimal(WHEEL_DIAMETER, "Sheave diameter", Unit::Millimeter, 1),
        VariableSpec::decimal(GEAR_RATIO, "Gear ratio", Unit::Ratio, 2)
            .with_encoding(Encoding::Ratio),
        VariableSpec::decimal(ROPING_RATIO, "Roping ratio", Unit::Ratio, 2)
            .with_encoding(Encoding::Ratio),
    ],
    required_known: 4,
    rearrangements: &[
        Rearrangement {
            targets: &[SPEED],
            formula: "speed = (RPM × 3.14 × (diameter ÷ 1000)) ÷ (gear × roping)",
            nonzero: &[GEAR_RATIO, ROPING_RATIO],
            evaluate: speed,
        },
        Rearrangement {
            targets: &[RPM],
            formula: "RPM = (speed × gear × roping) ÷ (3.14 × (diameter ÷ 1000))",
            nonzero: &[WHEEL_DIAMETER],
            evaluate: rpm,
        },
        Rearrangement {
            targets: &[WHEEL_DIAMETER],
            formula: "diameter = (speed × gear × roping × 1000) ÷ (RPM × 3.14)",
            nonzero: &[RPM],
            evaluate: wheel_diameter,
        },
        Rearrangement {
            targets: &[GEAR_RATIO],
            formula: "gear = (RPM × 3.14 × (diameter ÷ 1000)) ÷ (speed × roping)",
            nonzero: &[SPEED, ROPING_RATIO],
            evaluate: gear_ratio,
        },
        Rearrangement {
            targets: &[ROPING_RATIO],
            formula: "roping = (RPM × 3.14 × (diameter ÷ 1000)) ÷ (speed × gear)",
            nonzero: &[SPEED, GEAR_RATIO],
            evaluate: roping_ratio,
        },
    ],
};

/// Rope travel per motor revolution before reduction, in metres.
fn sheave_travel(ops: &Operands) -> f64 {
    ops.get(RPM) * PI_APPROX * (ops.get(WHEEL_DIAMETER) / MM_PER_M)
}

fn sheave_travel_text(ops: &Operands) -> String {
    format!("({} × 3.14 × ({} ÷ 1000))", ops.show(RPM), ops.show(WHEEL_DIAMETER))
}

fn speed(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let value = sheave_travel(ops) / (ops.get(GEAR_RATIO) * ops.get(ROPING_RATIO));
    Ok(vec![Computed::new(
        value,
        format!(
            "{} ÷ ({} × {})",
            sheave_travel_text(ops),
            ops.show(GEAR_RATIO),
            ops.show(ROPING_RATIO)
        ),
    )])
}

fn rpm(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let value = (ops.get(SPEED) * ops.get(GEAR_RATIO) * ops.get(ROPING_RATIO))
        / (PI_APPROX * (ops.get(WHEEL_DIAMETER) / MM_PER_M));
    Ok(vec![Computed::new(
        value,
        format!(
            "({} × {} × {}) ÷ (3.14 × ({} ÷ 1000))",
            ops.show(SPEED),
            ops.show(GEAR_RATIO),
            ops.show(ROPING_RATIO),
            ops.show(WHEEL_DIAMETER)
        ),
    )])
}

fn wheel_diameter(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let value = (ops.get(SPEED) * ops.get(GEAR_RATIO) * ops.get(ROPING_RATIO) * MM_PER_M)
        / (ops.get(RPM) * PI_APPROX);
    Ok(vec![Computed::new(
        value,
        format!(
            "({} × {} × {} × 1000) ÷ ({} × 3.14)",
            ops.show(SPEED),
            ops.show(GEAR_RATIO),
            ops.show(ROPING_RATIO),
            ops.show(RPM)
        ),
    )])
}

fn gear_ratio(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let value = sheave_travel(ops) / (ops.get(SPEED) * ops.get(ROPING_RATIO));
    Ok(vec![Computed::new(
        value,
        format!(
            "{} ÷ ({} × {})",
            sheave_travel_text(ops),
            ops.show(SPEED),
            ops.show(ROPING_RATIO)
        ),
    )])
}

fn roping_ratio(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let value = sheave_travel(ops) / (ops.get(SPEED) * ops.get(GEAR_RATIO));
    Ok(vec![Computed::new(
        value,
        format!(
            "{} ÷ ({} × {})",
            sheave_travel_text(ops),
            ops.show(SPEED),
            ops.show(GEAR_RATIO)
        ),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SolveError;
    use crate::solver::{solve, try_solve, SolveRequest};

    fn machine() -> SolveRequest {
        SolveRequest::new()
            .with(RPM, "1457")
            .with(WHEEL_DIAMETER, "400")
            .with(GEAR_RATIO, "43:2")
            .with(ROPING_RATIO, "2:1")
    }

    #[test]
    fn test_speed_with_ratio_strings() {
        let result = solve(&RELATION, &machine()).unwrap();

        // 1457 × 3.14 × 0.4 / (21.5 × 2) = 42.5579...
        assert_eq!(result.target(), SPEED);
        assert!((result.value() - 42.557953).abs() < 1e-5);
        assert_eq!(result.formatted(), "42.56");
        assert!(result.steps.iter().any(|s| s.contains("43:2") && s.contains("21.5")));
        assert!(result
            .steps
            .iter()
            .any(|s| s == "(1457 × 3.14 × (400 ÷ 1000)) ÷ (21.5 × 2) = 42.56 m/min"));
    }

    #[test]
    fn test_full_width_colon() {
        let request = machine().with(GEAR_RATIO, "43：2");
        let result = solve(&RELATION, &request).unwrap();
        assert_eq!(result.formatted(), "42.56");
    }

    #[test]
    fn test_rpm_round_trip() {
        let speed = solve(&RELATION, &machine()).unwrap().value();

        let request = SolveRequest::new()
            .with(SPEED, speed.to_string())
            .with(WHEEL_DIAMETER, "400")
            .with(GEAR_RATIO, "21.5")
            .with(ROPING_RATIO, "2");
        let result = solve(&RELATION, &request).unwrap();

        assert_eq!(result.target(), RPM);
        assert!((result.value() - 1457.0).abs() < 1e-6);
        assert_eq!(result.formatted(), "1457");
    }

    #[test]
    fn test_roping_from_others() {
        let request = SolveRequest::new()
            .with(SPEED, "60")
            .with(RPM, "1500")
            .with(WHEEL_DIAMETER, "500")
            .with(GEAR_RATIO, "19.625");
        let result = solve(&RELATION, &request).unwrap();

        // 1500 × 3.14 × 0.5 / (60 × 19.625) = 2
        assert_eq!(result.target(), ROPING_RATIO);
        assert_eq!(result.formatted(), "2");
    }

    #[test]
    fn test_zero_speed_guards_gear() {
        let request = SolveRequest::new()
            .with(SPEED, "0")
            .with(RPM, "1457")
            .with(WHEEL_DIAMETER, "400")
            .with(ROPING_RATIO, "2:1");
        assert_eq!(try_solve(&RELATION, &request), Err(SolveError::division_by_zero(SPEED)));
    }

    #[test]
    fn test_zero_denominator_ratio_is_absent() {
        // "43:0" is not a number, which leaves two fields empty
        let request = machine().with(GEAR_RATIO, "43:0");
        assert!(matches!(
            try_solve(&RELATION, &request),
            Err(SolveError::Underdetermined { populated: 3, .. })
        ));
    }
}
