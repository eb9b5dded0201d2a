//! Evaluation core: parsing, percent rewriting and result formatting
//!
//! Everything below [`crate::accumulator`] lives here. The accumulator only
//! ever talks to [`evaluator::Evaluator`]; the other modules are public so a
//! front end can reuse a single stage.

pub mod evaluator;
pub mod format;
mod operations;
pub mod parser;
pub mod percent;

pub use operations::Operation;

use thiserror::Error;

/// Result type for evaluation
pub type CalcResult<T> = Result<T, CalcError>;

/// Ways an expression can fail to evaluate.
///
/// The accumulator collapses every variant into the same `Error` display,
/// so the distinction only shows up in logs and in direct evaluator use.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// A `%` survived both percent rewrite passes
    #[error("Invalid percentage usage")]
    MalformedPercent,

    /// Evaluation produced infinity or NaN
    #[error("Result is not finite: {0}")]
    NonFiniteResult(f64),

    /// The rewritten text is not valid arithmetic
    #[error("Invalid expression: {0}")]
    Syntax(String),
}

impl CalcError {
    /// Creates a syntax error
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    /// Short machine-friendly name for the variant, used in log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MalformedPercent => "malformed_percent",
            Self::NonFiniteResult(_) => "non_finite_result",
            Self::Syntax(_) => "syntax",
        }
    }
}
