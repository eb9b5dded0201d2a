//! Calcpad - keypad calculator core
//!
//! The state behind a four-function calculator display: an [`Accumulator`]
//! collects keypad tokens into an expression string, guards against
//! malformed input while it is typed, and evaluates it on `equals`.
//!
//! # Pipeline
//!
//! - **Accumulate**: digits, a guarded decimal point, replaceable operators
//! - **Prepare**: drop one trailing operator, rewrite `%` into arithmetic
//! - **Evaluate**: tokenize, parse with precedence, compute in `f64`
//! - **Format**: round to 15 significant digits, print like a browser would
//!
//! Any failure shows `Error` on the display; the next digit starts over.
//!
//! # Example
//!
//! ```rust
//! use calcpad::prelude::*;
//!
//! let mut calc = Accumulator::new();
//! for token in InputToken::parse_sequence("1 0 0 + 1 0 % equals").unwrap() {
//!     calc.press(token);
//! }
//! assert_eq!(calc.display(), "110");
//!
//! // The evaluator is usable on its own
//! let eval = Evaluator::new();
//! assert_eq!(eval.calculate_display("0.1+0.2").unwrap(), "0.3");
//! ```
//!
//! [`Accumulator`]: accumulator::Accumulator

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod accumulator;
pub mod core;
pub mod driver;
pub mod input;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::accumulator::{Accumulator, ERROR_DISPLAY, INITIAL_EXPRESSION};
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, Operation};
    pub use crate::driver::{
        builtin_scenarios, run_scenario, CalculatorDriver, Scenario, ScenarioOutcome,
    };
    pub use crate::input::{Digit, InputError, InputToken, Operator};
}
