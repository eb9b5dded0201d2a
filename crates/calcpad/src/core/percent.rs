//! Percent rewriting
//!
//! `%` is not an arithmetic operator for the evaluator. Before parsing, two
//! textual passes turn it into plain arithmetic:
//!
//! 1. `A<op>B%` becomes `A <op> (A * b)` where `b` is `B/100` computed up
//!    front, so `100+10%` means "100 plus ten percent of 100".
//! 2. Any remaining `N%` becomes `(N/100)`.
//!
//! A `%` left over after both passes has no meaning and is rejected.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::core::format::number_literal;
use crate::core::{CalcError, CalcResult};

/// Unsigned decimal operand as it appears in accumulated text, ASCII digits only
const OPERAND: &str = r"[0-9]*\.?[0-9]+";

#[allow(clippy::expect_used)]
fn binary_percent() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"({OPERAND})([+\-*/])({OPERAND})%"))
            .expect("binary percent pattern is valid")
    })
}

#[allow(clippy::expect_used)]
fn standalone_percent() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"({OPERAND})%")).expect("standalone percent pattern is valid")
    })
}

/// Rewrites `A<op>B%` occurrences, left to right, without overlap.
#[must_use]
pub fn rewrite_binary(expression: &str) -> String {
    binary_percent()
        .replace_all(expression, |caps: &Captures<'_>| {
            let base = &caps[1];
            let op = &caps[2];
            let fraction = caps[3].parse::<f64>().map_or_else(
                |_| format!("{}/100", &caps[3]),
                |percent| number_literal(percent / 100.0),
            );
            format!("{base} {op} ({base} * {fraction})")
        })
        .into_owned()
}

/// Rewrites every remaining `N%` into `(N/100)`.
#[must_use]
pub fn rewrite_standalone(expression: &str) -> String {
    standalone_percent()
        .replace_all(expression, "($1/100)")
        .into_owned()
}

/// Runs both passes and rejects any `%` that survives them.
pub fn rewrite_percent(expression: &str) -> CalcResult<String> {
    let rewritten = rewrite_standalone(&rewrite_binary(expression));
    if rewritten.contains('%') {
        return Err(CalcError::MalformedPercent);
    }
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_rewrite_addition() {
        assert_eq!(rewrite_binary("100+10%"), "100 + (100 * 0.1)");
    }

    #[test]
    fn test_binary_rewrite_each_operator() {
        assert_eq!(rewrite_binary("50-20%"), "50 - (50 * 0.2)");
        assert_eq!(rewrite_binary("50*20%"), "50 * (50 * 0.2)");
        assert_eq!(rewrite_binary("50/20%"), "50 / (50 * 0.2)");
    }

    #[test]
    fn test_binary_rewrite_decimals() {
        assert_eq!(rewrite_binary("2.5+.5%"), "2.5 + (2.5 * 0.005)");
    }

    #[test]
    fn test_binary_rewrite_uses_nearest_operand() {
        // Only the operand directly before the operator takes part
        assert_eq!(rewrite_binary("1+200+10%"), "1+200 + (200 * 0.1)");
    }

    #[test]
    fn test_binary_rewrite_skips_signed_percent() {
        // "-10%" has no unsigned operand directly after the operator
        assert_eq!(rewrite_binary("5*-10%"), "5*-10%");
    }

    #[test]
    fn test_binary_rewrite_every_match() {
        assert_eq!(
            rewrite_binary("1+2%*3+4%"),
            "1 + (1 * 0.02)*3 + (3 * 0.04)"
        );
    }

    #[test]
    fn test_operands_are_ascii_digits_only() {
        assert_eq!(rewrite_binary("\u{661}\u{660}+5%"), "\u{661}\u{660}+5%");
        assert_eq!(
            rewrite_percent("\u{661}\u{660}+5%").unwrap(),
            "\u{661}\u{660}+(5/100)"
        );
    }

    #[test]
    fn test_standalone_rewrite() {
        assert_eq!(rewrite_standalone("50%"), "(50/100)");
        assert_eq!(rewrite_standalone("5*-10%"), "5*-(10/100)");
        assert_eq!(rewrite_standalone("10%+5"), "(10/100)+5");
    }

    #[test]
    fn test_rewrite_percent_chained() {
        // Neither percent follows an A<op> prefix, so both go through the standalone pass
        assert_eq!(
            rewrite_percent("10%+5%").unwrap(),
            "(10/100)+(5/100)"
        );
    }

    #[test]
    fn test_rewrite_percent_without_percent_is_identity() {
        assert_eq!(rewrite_percent("12+3").unwrap(), "12+3");
    }

    #[test]
    fn test_rewrite_percent_leftover_is_malformed() {
        assert_eq!(rewrite_percent("%5"), Err(CalcError::MalformedPercent));
        assert_eq!(rewrite_percent("1.%"), Err(CalcError::MalformedPercent));
        assert_eq!(rewrite_percent("5%%"), Err(CalcError::MalformedPercent));
    }
}
