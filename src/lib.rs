// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # makes-sense — decision tables that add up
//!
//! Declare a finite set of conditions and a table of rows mapping every
//! combination of condition outcomes to a result. makes-sense can then:
//!
//! - **Validate** that the table is exhaustive (every combination covered)
//!   and non-redundant (no combination covered twice)
//! - **Dispatch** at runtime: evaluate each condition through a caller
//!   supplied [`Ruleset`] and produce the matching row's result
//!
//! ## Quick Start
//!
//! ```rust
//! use makes_sense::{Args, DecisionTable, DomainKind, Literal, RowResult, Ruleset, F, T};
//!
//! let table = DecisionTable::define("FizzBuzz", |b| {
//!     b.arg("n");
//!     b.cond("divisible_by_three", DomainKind::Bool);
//!     b.cond("divisible_by_five", DomainKind::Bool);
//!     b.table(|r| {
//!         r.row([F, F], RowResult::arg("n"));
//!         r.row([T, F], "Fizz");
//!         r.row([F, T], "Buzz");
//!         r.row([T, T], "FizzBuzz");
//!     });
//! })?;
//!
//! // Design time: every combination covered exactly once
//! assert!(table.validate().is_success());
//!
//! // Run time
//! let divisible = |d: i64| {
//!     move |a: &Args| Literal::Bool(a.get("n").and_then(Literal::as_int).unwrap_or(0) % d == 0)
//! };
//! let fizzbuzz = table.bind_ruleset(
//!     Ruleset::new()
//!         .condition("divisible_by_three", ["n"], divisible(3))
//!         .condition("divisible_by_five", ["n"], divisible(5)),
//! )?;
//!
//! assert_eq!(fizzbuzz.dispatch(&Args::new().with("n", 15))?, Literal::from("FizzBuzz"));
//! assert_eq!(fizzbuzz.dispatch(&Args::new().with("n", 7))?, Literal::Int(7));
//! # Ok::<(), makes_sense::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                             │
//! │  conditions ──► space::universe ──────────┐                 │
//! │                                           ▼                 │
//! │  rows ──► expand::expand_rows ──► validate ──► Outcome      │
//! │                    │                                        │
//! │                    └──► Dispatcher(ruleset) ──► Literal     │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tables are immutable once defined. Validation and dispatch only read
//! them, so one table can be validated and dispatched against repeatedly
//! and from several threads at once.

pub mod config;
pub mod definition;
pub mod dispatch;
pub mod domain;
pub mod error;
pub mod expand;
pub mod outcome;
pub mod ruleset;
pub mod space;
pub mod table;
pub mod validate;
pub mod value;

// Re-exports
pub use config::EngineConfig;
pub use definition::{ConditionDef, ConditionType, ResultDef, RowDef, TableDefinition};
pub use dispatch::Dispatcher;
pub use domain::{Condition, DomainKind};
pub use error::{Error, Result};
pub use expand::{expand_rows, ExpandedRow};
pub use outcome::{Outcome, ValidationOutcome};
pub use ruleset::{ArgCapability, Args, Capability, FnCapability, Ruleset};
pub use space::{cartesian_product, universe};
pub use table::{AuthoredRow, DecisionTable, RowResult, RowsBuilder, TableBuilder};
pub use validate::{validate, Issue, ValidationReport};
pub use value::{lit, Literal, Value, ANY, F, T};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
