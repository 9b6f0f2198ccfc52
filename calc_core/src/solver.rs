//! # Relation Solver
//!
//! One generic solver for every relation table. A caller hands over a
//! [`SolveRequest`] (the raw text of each field, as typed) and gets back the
//! value(s) of whichever variables were left empty, with a derivation trace.
//!
//! ## Contract
//!
//! 1. Parse every field with its variable's encoding; unparseable or blank
//!    text counts as absent
//! 2. Apply clamps to parsed values and note them in the trace
//! 3. Exactly `required_known` values must be present, otherwise no result
//! 4. Pick the rearrangement whose targets are exactly the absent variables
//! 5. Reject user-supplied zero denominators before evaluating
//! 6. Evaluate, check the result is finite and fits the target's encoding,
//!    then format it to the target's precision
//!
//! The request is never modified and nothing is guessed: a form with too
//! many or too few values simply has no result yet.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::relations::motor_rpm::{RELATION, FREQUENCY, POLES};
//! use calc_core::solver::{solve, SolveRequest};
//!
//! let request = SolveRequest::new().with(FREQUENCY, "60").with(POLES, "4");
//! let result = solve(&RELATION, &request).unwrap();
//!
//! assert_eq!(result.formatted(), "1800");
//! assert!(result.is_target("rpm"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::errors::{SolveError, SolveOutcome};
use crate::format::{format_fixed, format_operand, register_bytes, to_register, Precision};
use crate::parsing::{normalize_colon, parse_value, Encoding};
use crate::relations::{Computed, Operands, Relation, RelationId, VariableSpec};
use crate::units::Unit;

// ============================================================================
// Request
// ============================================================================

/// Snapshot of one relation's raw inputs.
///
/// Field values are kept as typed; blank or missing fields are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Raw text per variable name
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Delta VL inverter modifier (frequency divider only)
    #[serde(default)]
    pub delta_vl_mode: bool,
}

impl SolveRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment
    pub fn with(mut self, name: impl Into<String>, raw: impl Into<String>) -> Self {
        self.set(name, raw);
        self
    }

    /// Set a field's raw text
    pub fn set(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        self.fields.insert(name.into(), raw.into());
    }

    pub fn with_delta_vl(mut self, enabled: bool) -> Self {
        self.delta_vl_mode = enabled;
        self
    }

    /// Raw text of a field, if any was entered
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

// ============================================================================
// Result
// ============================================================================

/// One solved variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvedValue {
    /// Variable name
    pub variable: String,
    /// Human label
    pub label: String,
    /// Numeric value (rounded to an integer for hex register targets;
    /// unrounded for integer decimal settings, which round only on display)
    pub value: f64,
    /// Display text in the variable's precision and encoding
    pub formatted: String,
    /// Unit of the value
    pub unit: Unit,
}

/// Extra device-facing output attached to a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Auxiliary {
    /// 16-bit value split across a high-byte and a low-byte register
    RegisterBytes {
        value_hex: String,
        high_register: String,
        high: String,
        low_register: String,
        low: String,
    },
}

/// Outcome of a successful solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Relation that was solved
    pub relation: RelationId,
    /// Solved variables, in rearrangement target order
    pub solved: Vec<SolvedValue>,
    /// Formula of the rearrangement used
    pub formula: String,
    /// Derivation trace: input notes first, then substitution steps
    pub steps: Vec<String>,
    /// Register byte split, when the target maps to device registers
    pub auxiliary: Option<Auxiliary>,
}

impl SolveResult {
    /// Name of the first solved variable
    pub fn target(&self) -> &str {
        self.solved.first().map(|s| s.variable.as_str()).unwrap_or("")
    }

    /// Value of the first solved variable
    pub fn value(&self) -> f64 {
        self.solved.first().map(|s| s.value).unwrap_or(f64::NAN)
    }

    /// Display text of the first solved variable
    pub fn formatted(&self) -> &str {
        self.solved.first().map(|s| s.formatted.as_str()).unwrap_or("")
    }

    /// Whether a variable was computed rather than entered
    pub fn is_target(&self, name: &str) -> bool {
        self.solved.iter().any(|s| s.variable == name)
    }

    /// Solved value by variable name
    pub fn get(&self, name: &str) -> Option<&SolvedValue> {
        self.solved.iter().find(|s| s.variable == name)
    }
}

// ============================================================================
// Solving
// ============================================================================

/// Solve a relation, or return `None` when the snapshot has no result.
pub fn solve(relation: &Relation, request: &SolveRequest) -> Option<SolveResult> {
    match try_solve(relation, request) {
        Ok(result) => Some(result),
        Err(e) => {
            debug!(relation = %relation.id, code = e.error_code(), "no result: {}", e);
            None
        }
    }
}

/// Solve a relation, reporting why there is no result.
pub fn try_solve(relation: &Relation, request: &SolveRequest) -> SolveOutcome<SolveResult> {
    for name in request.fields.keys() {
        if relation.variable(name).is_none() {
            trace!(relation = %relation.id, field = %name, "ignoring unknown field");
        }
    }

    let (operands, missing, notes) = read_inputs(relation, request);

    if operands.len() != relation.required_known {
        return Err(SolveError::Underdetermined {
            populated: operands.len(),
            required: relation.required_known,
            variables: relation.variables.len(),
        });
    }

    let rearrangement = relation
        .rearrangement_for(&missing)
        .ok_or_else(|| SolveError::NoRearrangement {
            missing: missing.iter().map(|m| m.to_string()).collect(),
        })?;
    trace!(relation = %relation.id, targets = ?rearrangement.targets, "selected rearrangement");

    for guard in rearrangement.nonzero {
        if operands.get(guard) == 0.0 {
            return Err(SolveError::division_by_zero(*guard));
        }
    }

    let computed = (rearrangement.evaluate)(&operands)?;

    let mut steps = notes;
    let mut solved = Vec::with_capacity(computed.len());
    let mut auxiliary = None;

    for (target, c) in rearrangement.targets.iter().zip(computed) {
        let var = relation.variable(target).ok_or_else(|| SolveError::NoRearrangement {
            missing: vec![target.to_string()],
        })?;
        let (value, formatted) = render(var, &c)?;

        match var.precision {
            Precision::Hex4 => {
                steps.push(format!("{} = {}", c.substituted, format_fixed(c.value, 2)));
                steps.push(format!("round → {} (decimal) = {}H", format_operand(value), formatted));
                if let Some(registers) = var.registers {
                    let (high, low) = register_bytes(value as u16);
                    steps.push(format!(
                        "{} = {}H, {} = {}H",
                        registers.high, high, registers.low, low
                    ));
                    auxiliary = Some(Auxiliary::RegisterBytes {
                        value_hex: formatted.clone(),
                        high_register: registers.high.to_string(),
                        high,
                        low_register: registers.low.to_string(),
                        low,
                    });
                }
            }
            Precision::Decimals(0) if c.value.fract() != 0.0 => {
                steps.push(format!("{} = {}", c.substituted, format_fixed(c.value, 2)));
                steps.push(format!("round → {}", var.unit.suffix(&formatted)));
            }
            Precision::Decimals(_) => {
                steps.push(format!("{} = {}", c.substituted, var.unit.suffix(&formatted)));
            }
        }

        solved.push(SolvedValue {
            variable: var.name.to_string(),
            label: var.label.to_string(),
            value,
            formatted,
            unit: var.unit,
        });
    }

    Ok(SolveResult {
        relation: relation.id,
        solved,
        formula: rearrangement.formula.to_string(),
        steps,
        auxiliary,
    })
}

/// Parse and clamp every field. Returns the known operands, the absent
/// variable names in declaration order, and trace notes about the inputs.
fn read_inputs(
    relation: &Relation,
    request: &SolveRequest,
) -> (Operands, Vec<&'static str>, Vec<String>) {
    let mut operands = Operands::new(request.delta_vl_mode);
    let mut missing = Vec::new();
    let mut notes = Vec::new();

    for var in relation.variables {
        let parsed = request
            .raw(var.name)
            .and_then(|r| parse_value(r, var.encoding).map(|v| (r, v)));
        let Some((raw, parsed)) = parsed else {
            missing.push(var.name);
            continue;
        };

        if let Some(note) = encoding_note(var, raw, parsed) {
            notes.push(note);
        }

        let value = match var.clamp {
            Some(clamp) => {
                let clamped = clamp.apply(parsed);
                if clamped != parsed {
                    notes.push(format!(
                        "{} {} below {} → using {}",
                        var.label,
                        var.unit.suffix(&format_operand(parsed)),
                        clamp.describe(),
                        var.unit.suffix(&format_operand(clamped))
                    ));
                }
                clamped
            }
            None => parsed,
        };
        operands.insert(var.name, value);
    }

    (operands, missing, notes)
}

/// Trace note for inputs whose text differs from their decimal value.
fn encoding_note(var: &VariableSpec, raw: &str, parsed: f64) -> Option<String> {
    match var.encoding {
        Encoding::Hexadecimal => Some(format!(
            "{} {} (hex) = {}",
            var.label,
            raw.trim(),
            format_operand(parsed)
        )),
        Encoding::Ratio if normalize_colon(raw).contains(':') => {
            Some(format!("{} {} = {}", var.label, raw.trim(), format_operand(parsed)))
        }
        Encoding::Ratio | Encoding::Decimal => None,
    }
}

/// Check and format a computed value for its target variable.
fn render(var: &VariableSpec, computed: &Computed) -> SolveOutcome<(f64, String)> {
    if !computed.value.is_finite() {
        return Err(SolveError::NonFinite {
            target: var.name.to_string(),
        });
    }
    let out_of_range = || SolveError::OutOfRange {
        target: var.name.to_string(),
        value: computed.value,
    };
    match var.precision {
        Precision::Hex4 => {
            let register = to_register(computed.value).ok_or_else(out_of_range)?;
            Ok((f64::from(register), format!("{:04X}", register)))
        }
        Precision::Decimals(_) => {
            let formatted = var.precision.render(computed.value).ok_or_else(out_of_range)?;
            Ok((computed.value, formatted))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SolveErrorKind;
    use crate::relations::{current_limit, divider, ALL_RELATIONS};

    #[test]
    fn test_all_filled_is_underdetermined() {
        for id in ALL_RELATIONS {
            let relation = id.relation();
            let mut request = SolveRequest::new();
            for var in relation.variables {
                request.set(var.name, "1");
            }
            let err = try_solve(relation, &request).unwrap_err();
            assert_eq!(err.kind(), SolveErrorKind::Underdetermined, "{}", id);
        }
    }

    #[test]
    fn test_empty_is_underdetermined() {
        for id in ALL_RELATIONS {
            let err = try_solve(id.relation(), &SolveRequest::new()).unwrap_err();
            assert_eq!(
                err,
                SolveError::Underdetermined {
                    populated: 0,
                    required: id.relation().required_known,
                    variables: id.relation().variables.len(),
                }
            );
        }
    }

    #[test]
    fn test_blank_text_is_absent() {
        let request = SolveRequest::new()
            .with(current_limit::MOTOR_CURRENT, "10")
            .with(current_limit::INVERTER_CURRENT, "5")
            .with(current_limit::CURRENT_LIMIT, "   ");
        let result = solve(&current_limit::RELATION, &request).unwrap();
        assert_eq!(result.target(), current_limit::CURRENT_LIMIT);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let request = SolveRequest::new()
            .with(current_limit::MOTOR_CURRENT, "10")
            .with(current_limit::INVERTER_CURRENT, "5")
            .with("colour", "blue");
        assert!(solve(&current_limit::RELATION, &request).is_some());
    }

    #[test]
    fn test_request_not_mutated() {
        let request = SolveRequest::new()
            .with(current_limit::MOTOR_CURRENT, "10")
            .with(current_limit::INVERTER_CURRENT, "5");
        let before = request.clone();
        let _ = solve(&current_limit::RELATION, &request);
        assert_eq!(request, before);
    }

    #[test]
    fn test_clamp_note_precedes_substitution() {
        let request = SolveRequest::new()
            .with(divider::RATED_SPEED, "45")
            .with(divider::RPM, "1200")
            .with(divider::ENCODER_PPR, "1024");
        let result = solve(&divider::RELATION, &request).unwrap();

        assert_eq!(result.steps[0], "Rated speed 45 m/min below minimum 60 → using 60 m/min");
        assert_eq!(result.steps.last().unwrap(), "E57F = 01H, E57E = 0BH");
    }

    #[test]
    fn test_hex_input_noted() {
        let request = SolveRequest::new()
            .with(divider::DIVIDER, "010B")
            .with(divider::RPM, "1200")
            .with(divider::ENCODER_PPR, "1024");
        let result = solve(&divider::RELATION, &request).unwrap();
        assert_eq!(result.steps[0], "Divider 010B (hex) = 267");
        assert!(result.auxiliary.is_none());
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: SolveRequest = serde_json::from_str(r#"{"fields": {"rpm": "1200"}}"#).unwrap();
        assert_eq!(request.raw("rpm"), Some("1200"));
        assert!(!request.delta_vl_mode);
    }

    #[test]
    fn test_result_serializes_auxiliary_tag() {
        let request = SolveRequest::new()
            .with(divider::RATED_SPEED, "60")
            .with(divider::RPM, "1200")
            .with(divider::ENCODER_PPR, "1024");
        let result = solve(&divider::RELATION, &request).unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["relation"], "frequency-divider");
        assert_eq!(json["auxiliary"]["type"], "register_bytes");
        assert_eq!(json["auxiliary"]["high_register"], "E57F");
    }
}
