//! Evaluation pipeline: trim, rewrite percents, parse, evaluate, format

use tracing::debug;

use crate::core::format::{number_literal, round_significant, SIGNIFICANT_DIGITS};
use crate::core::parser::{AstNode, Parser};
use crate::core::percent::rewrite_percent;
use crate::core::{CalcError, CalcResult};

/// Characters dropped from the end of an expression before evaluation.
///
/// `%` is absent: a trailing percent belongs to the last operand.
const TRAILING_STRIP: [char; 5] = ['+', '-', '*', '/', '.'];

/// Evaluator for accumulated expressions
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    significant_digits: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Creates an evaluator that rounds results to 15 significant digits
    #[must_use]
    pub const fn new() -> Self {
        Self {
            significant_digits: SIGNIFICANT_DIGITS,
        }
    }

    /// Overrides the number of significant digits kept in results
    #[must_use]
    pub const fn with_significant_digits(mut self, digits: usize) -> Self {
        self.significant_digits = digits;
        self
    }

    /// Number of significant digits kept in results
    #[must_use]
    pub const fn significant_digits(&self) -> usize {
        self.significant_digits
    }

    /// Evaluates an AST node with IEEE-754 semantics
    #[must_use]
    pub fn evaluate(&self, node: &AstNode) -> f64 {
        match node {
            AstNode::Number(n) => *n,
            AstNode::Negate(inner) => -self.evaluate(inner),
            AstNode::BinaryOp { left, op, right } => {
                op.apply(self.evaluate(left), self.evaluate(right))
            }
        }
    }

    /// Parses and evaluates plain arithmetic text, rejecting non-finite results
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        let value = self.evaluate(&ast);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(CalcError::NonFiniteResult(value))
        }
    }

    /// Turns accumulated text into parseable arithmetic.
    ///
    /// Drops one trailing operator or point, then rewrites percents.
    pub fn prepare(&self, expression: &str) -> CalcResult<String> {
        let trimmed = strip_trailing(expression);
        let rewritten = rewrite_percent(trimmed)?;
        debug!(expression, rewritten = %rewritten, "prepared expression");
        Ok(rewritten)
    }

    /// Runs the whole pipeline and returns the rounded numeric result.
    ///
    /// Rounding can carry a value near `f64::MAX` past it, so finiteness is
    /// checked again afterwards.
    pub fn calculate(&self, expression: &str) -> CalcResult<f64> {
        let prepared = self.prepare(expression)?;
        let value = self.evaluate_str(&prepared)?;
        let rounded = round_significant(value, self.significant_digits);
        if rounded.is_finite() {
            Ok(rounded)
        } else {
            Err(CalcError::NonFiniteResult(rounded))
        }
    }

    /// Runs the whole pipeline and returns the display string
    pub fn calculate_display(&self, expression: &str) -> CalcResult<String> {
        self.calculate(expression).map(number_literal)
    }
}

/// Removes a single trailing operator or decimal point, if any
#[must_use]
pub fn strip_trailing(expression: &str) -> &str {
    expression
        .strip_suffix(TRAILING_STRIP.as_slice())
        .unwrap_or(expression)
}
