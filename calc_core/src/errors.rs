//! # Error Types
//!
//! Structured error types for calc_core. There are two families:
//!
//! - [`SolveError`] explains why a relation snapshot produced no result.
//!   Incomplete or contradictory input is a normal, steady-state condition for
//!   a live form, so [`crate::solver::solve`] collapses every `SolveError` into
//!   `None`. Callers that want the reason use [`crate::solver::try_solve`].
//! - [`CalcError`] covers the outer surfaces (CLI arguments, settings files).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn relation_slug(raw: &str) -> CalcResult<&str> {
//!     if raw.trim().is_empty() {
//!         return Err(CalcError::invalid_input("relation", raw, "Relation name is empty"));
//!     }
//!     Ok(raw.trim())
//! }
//!
//! assert!(relation_slug("  ").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Result type alias for a single relation evaluation
pub type SolveOutcome<T> = Result<T, SolveError>;

/// The two ways a snapshot can fail to produce a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveErrorKind {
    /// Wrong number of populated variables
    Underdetermined,
    /// A denominator or radicand taken from user input makes the formula undefined
    Invalid,
}

/// Reason a relation could not be solved from the current snapshot.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum SolveError {
    /// Not exactly the required number of variables hold a value
    #[error("Underdetermined: {populated} of {variables} values given, {required} required")]
    Underdetermined {
        populated: usize,
        required: usize,
        variables: usize,
    },

    /// The unpopulated variables do not match any rearrangement
    #[error("No rearrangement solves for {missing:?}")]
    NoRearrangement { missing: Vec<String> },

    /// A user-supplied denominator is zero
    #[error("Division by zero: '{variable}' is 0")]
    DivisionByZero { variable: String },

    /// A square root would be taken of a negative number
    #[error("Negative radicand for '{target}': {radicand}")]
    NegativeRadicand { target: String, radicand: f64 },

    /// The result cannot be represented in the target's encoding
    #[error("Out of range for '{target}': {value}")]
    OutOfRange { target: String, value: f64 },

    /// Evaluation produced NaN or infinity
    #[error("Non-finite result for '{target}'")]
    NonFinite { target: String },
}

impl SolveError {
    /// Create a DivisionByZero error
    pub fn division_by_zero(variable: impl Into<String>) -> Self {
        SolveError::DivisionByZero {
            variable: variable.into(),
        }
    }

    /// Create a NegativeRadicand error
    pub fn negative_radicand(target: impl Into<String>, radicand: f64) -> Self {
        SolveError::NegativeRadicand {
            target: target.into(),
            radicand,
        }
    }

    /// Which of the two error families this belongs to
    pub fn kind(&self) -> SolveErrorKind {
        match self {
            SolveError::Underdetermined { .. } | SolveError::NoRearrangement { .. } => {
                SolveErrorKind::Underdetermined
            }
            SolveError::DivisionByZero { .. }
            | SolveError::NegativeRadicand { .. }
            | SolveError::OutOfRange { .. }
            | SolveError::NonFinite { .. } => SolveErrorKind::Invalid,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            SolveError::Underdetermined { .. } => "UNDERDETERMINED",
            SolveError::NoRearrangement { .. } => "NO_REARRANGEMENT",
            SolveError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            SolveError::NegativeRadicand { .. } => "NEGATIVE_RADICAND",
            SolveError::OutOfRange { .. } => "OUT_OF_RANGE",
            SolveError::NonFinite { .. } => "NON_FINITE",
        }
    }
}

/// Structured error type for the surfaces around the solver.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (unknown variable, malformed assignment, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// No relation with this name exists
    #[error("Unknown relation: {name}")]
    UnknownRelation { name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownRelation error
    pub fn unknown_relation(name: impl Into<String>) -> Self {
        CalcError::UnknownRelation { name: name.into() }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownRelation { .. } => "UNKNOWN_RELATION",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}
