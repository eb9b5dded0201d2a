//! Property-based tests for the accumulator
//!
//! Random keypad sessions must never leave the display in a state a real
//! calculator could not show.

#![allow(clippy::unwrap_used)]

use calcpad::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

fn digit_strategy() -> impl Strategy<Value = Digit> {
    (0u8..=9u8).prop_map(|d| Digit::new(d).unwrap())
}

fn operator_strategy() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Subtract),
        Just(Operator::Multiply),
        Just(Operator::Divide),
        Just(Operator::Percent),
    ]
}

/// Tokens that edit the expression but never evaluate it
fn editing_token_strategy() -> impl Strategy<Value = InputToken> {
    prop_oneof![
        4 => digit_strategy().prop_map(InputToken::Digit),
        1 => Just(InputToken::Point),
        2 => operator_strategy().prop_map(InputToken::Operator),
        1 => Just(InputToken::Backspace),
        1 => Just(InputToken::Clear),
    ]
}

fn any_token_strategy() -> impl Strategy<Value = InputToken> {
    prop_oneof![
        8 => editing_token_strategy(),
        1 => Just(InputToken::Equals),
    ]
}

fn session(tokens: &[InputToken]) -> Accumulator {
    let mut calc = Accumulator::new();
    for token in tokens {
        calc.press(*token);
    }
    calc
}

// ===== Display invariants =====

proptest! {
    /// The display is never empty
    #[test]
    fn prop_display_never_empty(tokens in prop::collection::vec(any_token_strategy(), 0..40)) {
        let mut calc = Accumulator::new();
        for token in tokens {
            let shown = calc.press(token);
            prop_assert!(!shown.is_empty());
        }
    }

    /// Clear always returns to the initial state
    #[test]
    fn prop_clear_resets(tokens in prop::collection::vec(any_token_strategy(), 0..40)) {
        let mut calc = session(&tokens);
        prop_assert_eq!(calc.clear(), INITIAL_EXPRESSION);
        prop_assert!(!calc.just_calculated());
    }

    /// Backspacing far enough always reaches `0`
    #[test]
    fn prop_backspace_bottoms_out(tokens in prop::collection::vec(editing_token_strategy(), 0..30)) {
        let mut calc = session(&tokens);
        for _ in 0..=tokens.len() {
            calc.backspace();
        }
        prop_assert_eq!(calc.display(), INITIAL_EXPRESSION);
    }

    /// No number being typed ever holds two decimal points
    #[test]
    fn prop_one_point_per_number(tokens in prop::collection::vec(editing_token_strategy(), 0..40)) {
        let calc = session(&tokens);
        for number in calc.display().split(Operator::is_symbol) {
            prop_assert!(number.matches('.').count() <= 1, "display {}", calc.display());
        }
    }
}

// ===== Entry rules =====

proptest! {
    /// Digits typed after a non-zero lead appear in order
    #[test]
    fn prop_digit_order_preserved(
        lead in 1u8..=9u8,
        rest in prop::collection::vec(digit_strategy(), 0..15),
    ) {
        let mut calc = Accumulator::new();
        calc.input_digit(Digit::new(lead).unwrap());
        for digit in &rest {
            calc.input_digit(*digit);
        }

        let expected: String = std::iter::once(char::from(b'0' + lead))
            .chain(rest.iter().map(|d| d.as_char()))
            .collect();
        prop_assert_eq!(calc.display(), expected.as_str());
    }

    /// A non-minus operator replaces whatever operator precedes it
    #[test]
    fn prop_operator_replacement(
        lead in 1u8..=9u8,
        first in operator_strategy(),
        second in operator_strategy().prop_filter("not minus", |op| *op != Operator::Subtract),
    ) {
        let mut calc = Accumulator::new();
        calc.input_digit(Digit::new(lead).unwrap());
        calc.input_operator(first);
        calc.input_operator(second);

        let expected = format!("{lead}{}", second.symbol());
        prop_assert_eq!(calc.display(), expected.as_str());
    }

    /// Two operators only ever meet when the second starts a negative operand
    #[test]
    fn prop_adjacent_operators_end_in_minus(tokens in prop::collection::vec(editing_token_strategy(), 0..40)) {
        let calc = session(&tokens);
        let chars: Vec<char> = calc.display().chars().collect();
        for pair in chars.windows(2) {
            if Operator::is_symbol(pair[0]) && Operator::is_symbol(pair[1]) {
                prop_assert_eq!(pair[1], '-', "display {}", calc.display());
            }
        }
    }

    /// A digit after a result starts a new expression
    #[test]
    fn prop_digit_after_result_replaces(
        tokens in prop::collection::vec(any_token_strategy(), 0..30),
        digit in digit_strategy(),
    ) {
        let mut calc = session(&tokens);
        calc.calculate();
        let expected = digit.as_char().to_string();
        prop_assert_eq!(calc.input_digit(digit), expected.as_str());
    }
}

// ===== Evaluation =====

proptest! {
    /// Pressing equals on a shown result does not change it
    #[test]
    fn prop_repeated_equals_is_stable(tokens in prop::collection::vec(any_token_strategy(), 0..40)) {
        let mut calc = session(&tokens);
        let first = calc.calculate().to_string();
        let second = calc.calculate().to_string();
        prop_assert_eq!(first, second);
    }

    /// Results are either `Error` or a finite number
    #[test]
    fn prop_result_is_number_or_error(tokens in prop::collection::vec(any_token_strategy(), 0..40)) {
        let mut calc = session(&tokens);
        let shown = calc.calculate().to_string();
        if shown != ERROR_DISPLAY {
            let value: f64 = shown.parse().unwrap();
            prop_assert!(value.is_finite());
        }
        prop_assert!(calc.just_calculated());
    }

    /// Adding two typed integers gives their sum
    #[test]
    fn prop_integer_addition(a in 0u32..100_000, b in 0u32..100_000) {
        let mut calc = Accumulator::new();
        for ch in a.to_string().chars() {
            calc.input_digit_or_point(ch).unwrap();
        }
        calc.input_operator(Operator::Add);
        for ch in b.to_string().chars() {
            calc.input_digit_or_point(ch).unwrap();
        }
        let expected = (u64::from(a) + u64::from(b)).to_string();
        prop_assert_eq!(calc.calculate(), expected.as_str());
    }
}
