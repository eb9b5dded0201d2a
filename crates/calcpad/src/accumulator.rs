//! Expression accumulator
//!
//! Holds the expression being typed and the "result on screen" flag, and
//! applies one input token at a time. Every entry point returns the text to
//! display afterwards.
//!
//! The editing rules are small but deliberately irregular:
//!
//! - a digit replaces a lone `0` or a shown result, otherwise it appends;
//! - a point is only added if the number being typed has none yet;
//! - an operator replaces a trailing operator, except that `-` may follow
//!   another operator once to start a negative operand (`5*-2`);
//! - backspace right after a result clears everything.

use tracing::{debug, trace};

use crate::core::evaluator::Evaluator;
use crate::input::{Digit, InputError, InputResult, InputToken, Operator};

/// Expression shown on construction and after clear
pub const INITIAL_EXPRESSION: &str = "0";

/// Display shown when evaluation fails
pub const ERROR_DISPLAY: &str = "Error";

/// Calculator state for one session
#[derive(Debug, Clone)]
pub struct Accumulator {
    expression: String,
    just_calculated: bool,
    evaluator: Evaluator,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    /// Creates an accumulator showing `0`
    #[must_use]
    pub fn new() -> Self {
        Self::with_evaluator(Evaluator::new())
    }

    /// Creates an accumulator with a custom evaluator
    #[must_use]
    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        Self {
            expression: INITIAL_EXPRESSION.to_string(),
            just_calculated: false,
            evaluator,
        }
    }

    /// Text to display
    #[must_use]
    pub fn display(&self) -> &str {
        &self.expression
    }

    /// True right after `equals`, until the next digit, point or operator
    #[must_use]
    pub const fn just_calculated(&self) -> bool {
        self.just_calculated
    }

    /// True when the last evaluation failed
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.just_calculated && self.expression == ERROR_DISPLAY
    }

    /// The evaluator used by [`calculate`](Self::calculate)
    #[must_use]
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Dispatches one token to its entry point
    pub fn press(&mut self, token: InputToken) -> &str {
        trace!(%token, before = %self.expression, "press");
        match token {
            InputToken::Digit(digit) => self.input_digit(digit),
            InputToken::Point => self.input_point(),
            InputToken::Operator(op) => self.input_operator(op),
            InputToken::Clear => self.clear(),
            InputToken::Backspace => self.backspace(),
            InputToken::Equals => self.calculate(),
        }
    }

    /// Parses a token identifier and dispatches it
    pub fn press_str(&mut self, identifier: &str) -> InputResult<&str> {
        let token = identifier.parse()?;
        Ok(self.press(token))
    }

    /// Resets to `0`
    pub fn clear(&mut self) -> &str {
        self.expression.clear();
        self.expression.push_str(INITIAL_EXPRESSION);
        self.just_calculated = false;
        &self.expression
    }

    /// Deletes the last character, or clears if a result is showing
    pub fn backspace(&mut self) -> &str {
        if self.just_calculated {
            return self.clear();
        }
        self.expression.pop();
        if self.expression.is_empty() {
            self.expression.push_str(INITIAL_EXPRESSION);
        }
        &self.expression
    }

    /// Enters a digit
    pub fn input_digit(&mut self, digit: Digit) -> &str {
        if self.just_calculated || self.expression == INITIAL_EXPRESSION {
            self.expression.clear();
            self.just_calculated = false;
        }
        self.expression.push(digit.as_char());
        &self.expression
    }

    /// Enters a decimal point if the current number has none
    pub fn input_point(&mut self) -> &str {
        if self.just_calculated {
            self.expression.clear();
            self.expression.push_str("0.");
            self.just_calculated = false;
            return &self.expression;
        }

        let current_number = self
            .expression
            .rsplit(Operator::is_symbol)
            .next()
            .unwrap_or_default();
        if !current_number.contains('.') {
            self.expression.push('.');
        }
        &self.expression
    }

    /// Routes a digit character or `.` to the matching entry point
    pub fn input_digit_or_point(&mut self, ch: char) -> InputResult<&str> {
        if ch == '.' {
            return Ok(self.input_point());
        }
        let digit = Digit::from_char(ch).ok_or(InputError::NotDigitOrPoint(ch))?;
        Ok(self.input_digit(digit))
    }

    /// Enters an operator, replacing a trailing one where the rules say so
    pub fn input_operator(&mut self, op: Operator) -> &str {
        self.just_calculated = false;
        let symbol = op.symbol();

        let ends_in_operator = match self.expression.chars().last() {
            Some('+' | '*' | '/' | '%') => true,
            Some('-') => self.expression.len() > 1,
            _ => false,
        };

        if ends_in_operator && !(op == Operator::Subtract && !self.expression.ends_with('-')) {
            let replaced = self.expression.pop();
            // A negative-operand `-` goes together with the operator before it
            if replaced == Some('-') && op != Operator::Subtract && self.ends_with_operator() {
                self.expression.pop();
            }
        }
        self.expression.push(symbol);
        &self.expression
    }

    fn ends_with_operator(&self) -> bool {
        self.expression.ends_with(Operator::is_symbol)
    }

    /// Evaluates the expression and shows the result or `Error`
    pub fn calculate(&mut self) -> &str {
        match self.evaluator.calculate_display(&self.expression) {
            Ok(result) => {
                debug!(expression = %self.expression, %result, "calculated");
                self.expression = result;
            }
            Err(err) => {
                debug!(
                    expression = %self.expression,
                    kind = err.kind(),
                    error = %err,
                    "evaluation failed"
                );
                self.expression.clear();
                self.expression.push_str(ERROR_DISPLAY);
            }
        }
        self.just_calculated = true;
        &self.expression
    }
}
