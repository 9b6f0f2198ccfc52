//! # calc_core - Elevator Commissioning Formula Engine
//!
//! `calc_core` solves the coupled formulas used when commissioning an
//! elevator inverter: current limits, pole-angle offset, traction speed,
//! encoder divider registers, motor speed, phase-converter sizing and Ohm's
//! law. Each formula is an immutable relation table; leave the unknown
//! field(s) empty and the solver fills them in, with a derivation trace.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over a request snapshot; inputs are never mutated
//! - **Declarative**: One generic solver, one table per relation
//! - **JSON-First**: Requests, results and errors implement Serialize/Deserialize
//! - **Rich Errors**: `try_solve` reports why a snapshot has no result
//!
//! ## Quick Start
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
//! for step in &result.steps {
//!     println!("{}", step);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`relations`] - The relation tables
//! - [`solver`] - Generic inverse solver and request/result types
//! - [`speed_profile`] - 04-XX multi-step speed table
//! - [`catalog`] - Calculator metadata, search and reference generation
//! - [`parsing`] - Decimal, hex and ratio input parsing
//! - [`format`] - Result formatting and register byte split
//! - [`settings`] - User defaults
//! - [`units`] - Units attached to variables
//! - [`errors`] - Structured error types

pub mod catalog;
pub mod errors;
pub mod format;
pub mod parsing;
pub mod relations;
pub mod settings;
pub mod solver;
pub mod speed_profile;
pub mod units;

pub use catalog::{search, Calculator, Category};
pub use errors::{CalcError, CalcResult, SolveError, SolveErrorKind};
pub use relations::{Relation, RelationId, ALL_RELATIONS};
pub use settings::{OutputFormat, Settings};
pub use solver::{solve, try_solve, SolveRequest, SolveResult};
