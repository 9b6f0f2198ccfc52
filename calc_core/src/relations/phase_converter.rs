//! # Phase Converter Sizing
//!
//! Converter rating for a motor load:
//!
//! ```text
//! rating = kW × 22.371
//! ```
//!
//! The factor is the vendor's sizing table constant and is used as written.

use super::{Computed, Operands, Rearrangement, Relation, RelationId, VariableSpec};
use crate::errors::SolveOutcome;
use crate::units::Unit;

pub const KILOWATTS: &str = "kilowatts";
pub const CONVERTER_SPEC: &str = "converter_spec";

pub const SIZING_FACTOR: f64 = 22.371;

pub static RELATION: Relation = Relation {
    id: RelationId::PhaseConverter,
    variables: &[
        VariableSpec::decimal(KILOWATTS, "Motor power", Unit::Kilowatt, 3),
        VariableSpec::decimal(CONVERTER_SPEC, "Converter rating", Unit::ConverterRating, 2),
    ],
    required_known: 1,
    rearrangements: &[
        Rearrangement {
            targets: &[CONVERTER_SPEC],
            formula: "rating = kW × 22.371",
            nonzero: &[],
            evaluate: converter_spec,
        },
        Rearrangement {
            targets: &[KILOWATTS],
            formula: "kW = rating ÷ 22.371",
            nonzero: &[],
            evaluate: kilowatts,
        },
    ],
};

fn converter_spec(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    Ok(vec![Computed::new(
        ops.get(KILOWATTS) * SIZING_FACTOR,
        format!("{} × 22.371", ops.show(KILOWATTS)),
    )])
}

fn kilowatts(ops: &Operands) -> SolveOutcome<Vec<Computed>> {
    Ok(vec![Computed::new(
        ops.get(CONVERTER_SPEC) / SIZING_FACTOR,
        format!("{} ÷ 22.371", ops.show(CONVERTER_SPEC)),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve, SolveRequest};

    #[test]
    fn test_rating_from_kilowatts() {
        let request = SolveRequest::new().with(KILOWATTS, "10");
        let result = solve(&RELATION, &request).unwrap();

        assert_eq!(result.target(), CONVERTER_SPEC);
        assert_eq!(result.formatted(), "223.71");
        assert_eq!(result.steps.last().unwrap(), "10 × 22.371 = 223.71");
    }

    #[test]
    fn test_kilowatts_from_rating() {
        let request = SolveRequest::new().with(CONVERTER_SPEC, "223.71");
        let result = solve(&RELATION, &request).unwrap();

        assert_eq!(result.target(), KILOWATTS);
        assert!((result.value() - 10.0).abs() < 1e-9);
        assert_eq!(result.formatted(), "10");
    }

    #[test]
    fn test_non_numeric_is_absent() {
        let request = SolveRequest::new().with(KILOWATTS, "ten");
        assert!(solve(&RELATION, &request).is_none());
    }
}
