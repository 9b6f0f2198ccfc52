//! # Relations
//!
//! A relation is an immutable physical law over a fixed set of named
//! variables, stored as a declarative table: one [`VariableSpec`] per variable
//! and one [`Rearrangement`] per unknown. The generic solver in
//! [`crate::solver`] picks the rearrangement whose targets are exactly the
//! variables the user left empty.
//!
//! ## Available Relations
//!
//! - [`current_limit`] - inverter current limit parameter (06-11)
//! - [`divider`] - encoder frequency divider registers (E57E/E57F)
//! - [`traction`] - traction machine speed, gear and roping
//! - [`ohms_law`] - paired Ohm's law / power solve
//! - [`pole_angle`] - magnetic pole angle offset (08-09)
//! - [`motor_rpm`] - synchronous speed from frequency and poles
//! - [`phase_converter`] - phase converter sizing
//!
//! ## Table Invariants
//!
//! - Every rearrangement's targets are declared variables
//! - For single-unknown relations, each variable is the target of exactly one
//!   rearrangement
//! - A rearrangement only reads variables outside its own targets
//!
//! These are checked for every relation in this module's tests.

pub mod current_limit;
pub mod divider;
pub mod motor_rpm;
pub mod ohms_law;
pub mod phase_converter;
pub mod pole_angle;
pub mod traction;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::SolveOutcome;
use crate::format::{format_operand, Precision};
use crate::parsing::{Clamp, Encoding};
use crate::units::Unit;

// ============================================================================
// Relation Identity
// ============================================================================

/// Identifier for each relation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationId {
    /// Current limit percentage (parameter 06-11)
    CurrentLimit,
    /// Frequency divider registers (E57E/E57F)
    FrequencyDivider,
    /// Traction machine speed
    TractionSpeed,
    /// Ohm's law with power
    OhmsLaw,
    /// Magnetic pole angle offset (parameter 08-09)
    PoleAngle,
    /// Synchronous motor speed
    MotorRpm,
    /// Phase converter sizing
    PhaseConverter,
}

/// Every relation, in catalog order.
pub const ALL_RELATIONS: &[RelationId] = &[
    RelationId::PoleAngle,
    RelationId::CurrentLimit,
    RelationId::TractionSpeed,
    RelationId::FrequencyDivider,
    RelationId::MotorRpm,
    RelationId::PhaseConverter,
    RelationId::OhmsLaw,
];

impl RelationId {
    /// The relation's declarative table
    pub fn relation(&self) -> &'static Relation {
        match self {
            RelationId::CurrentLimit => &current_limit::RELATION,
            RelationId::FrequencyDivider => &divider::RELATION,
            RelationId::TractionSpeed => &traction::RELATION,
            RelationId::OhmsLaw => &ohms_law::RELATION,
            RelationId::PoleAngle => &pole_angle::RELATION,
            RelationId::MotorRpm => &motor_rpm::RELATION,
            RelationId::PhaseConverter => &phase_converter::RELATION,
        }
    }

    /// Stable kebab-case name used on the command line and in JSON
    pub fn slug(&self) -> &'static str {
        match self {
            RelationId::CurrentLimit => "current-limit",
            RelationId::FrequencyDivider => "frequency-divider",
            RelationId::TractionSpeed => "traction-speed",
            RelationId::OhmsLaw => "ohms-law",
            RelationId::PoleAngle => "pole-angle",
            RelationId::MotorRpm => "motor-rpm",
            RelationId::PhaseConverter => "phase-converter",
        }
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Device register pair that receives the high and low byte of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterPair {
    /// Register for bits 8-15
    pub high: &'static str,
    /// Register for bits 0-7
    pub low: &'static str,
}

/// Definition of one variable slot in a relation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableSpec {
    /// Machine name (e.g. "motor_current")
    pub name: &'static str,
    /// Short human label
    pub label: &'static str,
    /// Unit the value is entered and shown in
    pub unit: Unit,
    /// How raw text is parsed
    pub encoding: Encoding,
    /// Domain rule applied to known values before use
    pub clamp: Option<Clamp>,
    /// Display precision when this variable is solved
    pub precision: Precision,
    /// Registers receiving the byte split when solved
    pub registers: Option<RegisterPair>,
}

impl VariableSpec {
    /// Decimal variable with the given display precision
    pub const fn decimal(
        name: &'static str,
        label: &'static str,
        unit: Unit,
        decimals: u8,
    ) -> Self {
        Self {
            name,
            label,
            unit,
            encoding: Encoding::Decimal,
            clamp: None,
            precision: Precision::Decimals(decimals),
            registers: None,
        }
    }

    pub const fn with_encoding(self, encoding: Encoding) -> Self {
        Self { encoding, ..self }
    }

    pub const fn with_clamp(self, clamp: Clamp) -> Self {
        Self {
            clamp: Some(clamp),
            ..self
        }
    }

    pub const fn with_precision(self, precision: Precision) -> Self {
        Self { precision, ..self }
    }

    pub const fn with_registers(self, high: &'static str, low: &'static str) -> Self {
        Self {
            registers: Some(RegisterPair { high, low }),
            ..self
        }
    }
}

// ============================================================================
// Rearrangements
// ============================================================================

/// Value computed by a rearrangement, with its substituted expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Computed {
    /// Numeric result
    pub value: f64,
    /// The formula with operand values substituted (e.g. "(10 ÷ 5) × 200")
    pub substituted: String,
}

impl Computed {
    pub fn new(value: f64, substituted: impl Into<String>) -> Self {
        Self {
            value,
            substituted: substituted.into(),
        }
    }
}

/// Evaluates a rearrangement; returns one [`Computed`] per target, in order.
pub type EvaluateFn = fn(&Operands) -> SolveOutcome<Vec<Computed>>;

/// One closed-form solution of a relation for a set of unknowns.
#[derive(Debug, Clone, Copy)]
pub struct Rearrangement {
    /// Variables this rearrangement computes
    pub targets: &'static [&'static str],
    /// Plain-text formula for display
    pub formula: &'static str,
    /// Known variables used as denominators; zero means no result
    pub nonzero: &'static [&'static str],
    /// The arithmetic
    pub evaluate: EvaluateFn,
}

impl Rearrangement {
    /// Whether this rearrangement solves exactly the given unknowns
    pub fn solves(&self, missing: &[&str]) -> bool {
        self.targets.len() == missing.len()
            && missing.iter().all(|m| self.targets.iter().any(|t| t == m))
    }
}

// ============================================================================
// Relation Table
// ============================================================================

/// An immutable law over a fixed set of variables.
#[derive(Debug)]
pub struct Relation {
    /// Which relation this is
    pub id: RelationId,
    /// Variable slots, in display order
    pub variables: &'static [VariableSpec],
    /// How many variables must hold a value before solving
    pub required_known: usize,
    /// One entry per solvable unknown (set)
    pub rearrangements: &'static [Rearrangement],
}

impl Relation {
    /// Look up a variable by name
    pub fn variable(&self, name: &str) -> Option<&'static VariableSpec> {
        self.variables.iter().find(|v| v.name == name)
    }

    /// Variable names in display order
    pub fn variable_names(&self) -> Vec<&'static str> {
        self.variables.iter().map(|v| v.name).collect()
    }

    /// The rearrangement whose targets are exactly `missing`
    pub fn rearrangement_for(&self, missing: &[&str]) -> Option<&'static Rearrangement> {
        self.rearrangements.iter().find(|r| r.solves(missing))
    }
}

// ============================================================================
// Operands
// ============================================================================

/// Known values handed to a rearrangement, after parsing and clamping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operands {
    values: BTreeMap<&'static str, f64>,
    delta_vl_mode: bool,
}

impl Operands {
    pub fn new(delta_vl_mode: bool) -> Self {
        Self {
            values: BTreeMap::new(),
            delta_vl_mode,
        }
    }

    /// Build operands directly from values (handy for tests and callers
    /// that already hold numbers).
    pub fn from_values(values: &[(&'static str, f64)], delta_vl_mode: bool) -> Self {
        let mut operands = Self::new(delta_vl_mode);
        for &(name, value) in values {
            operands.insert(name, value);
        }
        operands
    }

    pub fn insert(&mut self, name: &'static str, value: f64) {
        self.values.insert(name, value);
    }

    /// Value of a known variable; NaN if it was never supplied.
    ///
    /// The solver only calls a rearrangement with its inputs present, and a
    /// NaN result is rejected as non-finite.
    pub fn get(&self, name: &str) -> f64 {
        self.values.get(name).copied().unwrap_or(f64::NAN)
    }

    /// Operand as echoed in a derivation trace
    pub fn show(&self, name: &str) -> String {
        format_operand(self.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Delta VL inverter modifier
    pub fn delta_vl_mode(&self) -> bool {
        self.delta_vl_mode
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
