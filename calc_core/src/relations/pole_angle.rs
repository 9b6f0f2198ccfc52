//! # Magnetic Pole Angle Offset (08-09)
//!
//! After a pole-position tune the inverter reports the measured rotor angle;
//! parameter 08-09 takes that angle shifted back by a quarter turn:
//!
//! ```text
//! angle > 90  →  offset = angle − 90
//! otherwise   →  offset = 360 − (90 − angle)
//! ```
//!
//! The offset is normalized into `[0, 360)` and rounded to one decimal on
//! the scaled value. The inverse reads a programmed offset back to the
//! measured angle.

use super::{Computed, Operands, Rearrangement, Relation, RelationId, VariableSpec};
use crate::errors::SolveOutcome;
use crate::format::{format_operand, round_to};
use crate::units::Unit;

pub const ANGLE: &str = "angle";
pub const OFFSET: &str = "offset";

const QUARTER_TURN: f64 = 90.0;
const FULL_TURN: f64 = 360.0;

pub static RELATION: Relation = Relation {
    id: RelationId::PoleAngle,
    variables: &[
        VariableSpec::decimal(ANGLE, "Measured pole angle", Unit::Degree, 1),
        VariableSpec::decimal(OFFSET, "Pole offset (08-09)", Unit::Degree, 1),
    ],
    required_known: 1,
    rearrangements: &[
        Rearrangement {
            targets: &[OFFSET],
            formula: "offset = angle − 90 if angle > 90, else 360 − (90 − angle)",
            nonzero: &[],
            evaluate: offset,
        },
        Rearrangement {
            targets: &[ANGLE],
            formula: "angle = offset − 270 if offset ≥ 270, else offset + 90",
            nonzero: &[],
            evaluate: angle,
        },
    ],
};

/// Wrap into `[0, 360)` after rounding to one decimal.
fn normalize(value: f64) -> f64 {
    round_to(value.rem_euclid(FULL_TURN), 1).rem_euclid(FULL_TURN)
}

fn wrapped(raw: f64, expression: String) -> Computed {
    let value = normalize(raw);
    if (value - round_to(raw, 1)).abs() > f64::EPSILON {
        Computed::new(value, format!("({}) mod 360", expression))
    } else {
        Computed::new(value, expression)
    }
}

fn offset(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let angle = ops.get(ANGLE);
    let shown = ops.show(ANGLE);
    let computed = if angle > QUARTER_TURN {
        wrapped(angle - QUARTER_TURN, format!("{} − 90", shown))
    } else {
        wrapped(FULL_TURN - (QUARTER_TURN - angle), format!("360 − (90 − {})", shown))
    };
    Ok(vec![computed])
}

fn angle(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    let offset = ops.get(OFFSET);
    let shown = ops.show(OFFSET);
    let back = FULL_TURN - QUARTER_TURN;
    let computed = if offset >= back {
        wrapped(offset - back, format!("{} − {}", shown, format_operand(back)))
    } else {
        wrapped(offset + QUARTER_TURN, format!("{} + 90", shown))
    };
    Ok(vec![computed])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve, SolveRequest};

    fn offset_for(angle: &str) -> String {
        let request = SolveRequest::new().with(ANGLE, angle);
        solve(&RELATION, &request).unwrap().formatted().to_string()
    }

    #[test]
    fn test_angle_above_quarter_turn() {
        let request = SolveRequest::new().with(ANGLE, "142.7");
        let result = solve(&RELATION, &request).unwrap();

        assert_eq!(result.target(), OFFSET);
        assert_eq!(result.value(), 52.7);
        assert_eq!(result.formatted(), "52.7");
        assert!(result.steps.iter().any(|s| s.starts_with("142.7 − 90 = 52.7")));
    }

    #[test]
    fn test_angle_below_quarter_turn() {
        assert_eq!(offset_for("45"), "315");
        assert_eq!(offset_for("0"), "270");
    }

    #[test]
    fn test_quarter_turn_wraps_to_zero() {
        assert_eq!(offset_for("90"), "0");
        assert_eq!(offset_for("450"), "0");
    }

    #[test]
    fn test_wrap_is_traced() {
        let request = SolveRequest::new().with(ANGLE, "500");
        let result = solve(&RELATION, &request).unwrap();
        // 500 − 90 = 410 → 50
        assert_eq!(result.formatted(), "50");
        assert!(result.steps.iter().any(|s| s.contains("mod 360")));
    }

    #[test]
    fn test_rounding_near_full_turn() {
        // 449.96 − 90 = 359.96 → 360.0 → 0
        assert_eq!(offset_for("449.96"), "0");
    }

    #[test]
    fn test_offset_reads_back_to_angle() {
        for (offset, expected) in [("52.7", 142.7), ("315", 45.0), ("270", 0.0), ("0", 90.0)] {
            let request = SolveRequest::new().with(OFFSET, offset);
            let result = solve(&RELATION, &request).unwrap();
            assert_eq!(result.target(), ANGLE);
            assert!((result.value() - expected).abs() < 1e-9, "{} → {}", offset, result.value());
        }
    }

    #[test]
    fn test_both_filled_no_result() {
        let request = SolveRequest::new().with(ANGLE, "142.7").with(OFFSET, "52.7");
        assert!(solve(&RELATION, &request).is_none());
    }
}
