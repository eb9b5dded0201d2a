//! Display formatting for evaluation results

/// Significant decimal digits kept in a displayed result
pub const SIGNIFICANT_DIGITS: usize = 15;

/// Magnitude at and above which results switch to exponent notation
const EXPONENT_UPPER: f64 = 1e21;

/// Magnitude below which results switch to exponent notation
const EXPONENT_LOWER: f64 = 1e-6;

/// Rounds `value` to `digits` significant decimal digits.
///
/// Zero, non-finite values and `digits == 0` pass through unchanged.
#[must_use]
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if digits == 0 || value == 0.0 || !value.is_finite() {
        return value;
    }
    // Rounds on the exact binary value, like toPrecision
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}

/// Formats a finite result for the display.
///
/// The value is rounded to [`SIGNIFICANT_DIGITS`] and printed with
/// [`number_literal`]: `110`, `0.5`, `-10`, `1e+21`, `1.5e-7`.
#[must_use]
pub fn format_result(value: f64) -> String {
    number_literal(round_significant(value, SIGNIFICANT_DIGITS))
}

/// Prints a number in its shortest round-tripping form.
///
/// Integers have no decimal point, magnitudes of at least 1e21 or below
/// 1e-6 use exponent notation with an explicit exponent sign, and negative
/// zero prints as `0`. The output is always accepted by the tokenizer.
#[must_use]
pub fn number_literal(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= EXPONENT_UPPER || magnitude < EXPONENT_LOWER {
        let formatted = format!("{value:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        };
    }

    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_format_integers() {
        assert_eq!(format_result(15.0), "15");
        assert_eq!(format_result(-10.0), "-10");
        assert_eq!(format_result(110.0), "110");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_result(0.5), "0.5");
        assert_eq!(format_result(-2.25), "-2.25");
    }

    #[test]
    fn test_format_rounds_float_noise() {
        assert_eq!(format_result(0.1 + 0.2), "0.3");
        assert_eq!(format_result(1.1 * 3.0), "3.3");
    }

    #[test]
    fn test_format_zero_and_negative_zero() {
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(-0.0), "0");
    }

    #[test]
    fn test_format_large_values() {
        assert_eq!(format_result(1e20), "100000000000000000000");
        assert_eq!(format_result(1e21), "1e+21");
        assert_eq!(format_result(-2.5e30), "-2.5e+30");
    }

    #[test]
    fn test_format_small_values() {
        assert_eq!(format_result(0.000001), "0.000001");
        assert_eq!(format_result(0.0000001), "1e-7");
        assert_eq!(format_result(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_number_literal_keeps_full_precision() {
        assert_eq!(number_literal(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(number_literal(0.1), "0.1");
        assert_eq!(number_literal(1e-7), "1e-7");
    }

    #[test]
    fn test_round_significant() {
        assert_eq!(round_significant(123_456.0, 2), 120_000.0);
        assert_eq!(round_significant(0.123_456, 3), 0.123);
        assert_eq!(round_significant(1.0 / 3.0, 15), 0.333_333_333_333_333);
    }

    #[test]
    fn test_round_significant_passthrough() {
        assert_eq!(round_significant(0.0, 15), 0.0);
        assert_eq!(round_significant(42.5, 0), 42.5);
        assert!(round_significant(f64::NAN, 15).is_nan());
        assert_eq!(round_significant(f64::INFINITY, 15), f64::INFINITY);
    }

    proptest! {
        #[test]
        fn prop_integers_format_plainly(n in -999_999_999_999i64..999_999_999_999i64) {
            prop_assert_eq!(format_result(n as f64), n.to_string());
        }

        #[test]
        fn prop_formatted_value_reparses(v in -1e15f64..1e15) {
            let text = format_result(v);
            let reparsed: f64 = text.parse().unwrap();
            prop_assert_eq!(reparsed, round_significant(v, SIGNIFICANT_DIGITS) + 0.0);
        }
    }
}
