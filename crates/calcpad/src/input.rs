//! Input tokens
//!
//! A front end translates its own events (button clicks, key presses,
//! script lines) into these tokens and hands them to
//! [`Accumulator::press`](crate::accumulator::Accumulator::press).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for token parsing
pub type InputResult<T> = Result<T, InputError>;

/// Errors raised while turning identifiers into tokens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The identifier names no known token
    #[error("Unknown input token '{0}'")]
    UnknownToken(String),

    /// A character was routed to digit/point entry but is neither
    #[error("'{0}' is not a digit or decimal point")]
    NotDigitOrPoint(char),
}

/// A single decimal digit, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digit(u8);

impl Digit {
    /// Creates a digit, or `None` if `value > 9`
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Creates a digit from its ASCII character
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        ch.to_digit(10).and_then(|d| Self::new(d as u8))
    }

    /// Numeric value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// ASCII character for this digit
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Operator keys. `Percent` is entered like an operator but evaluated by
/// the percent rewrite rather than the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Percent,
}

impl Operator {
    /// All operator keys
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Percent,
    ];

    /// Symbol appended to the expression
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Percent => '%',
        }
    }

    /// Maps a symbol to its operator key
    #[must_use]
    pub const fn from_symbol(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '%' => Some(Self::Percent),
            _ => None,
        }
    }

    /// Returns true if `ch` is any operator symbol
    #[must_use]
    pub const fn is_symbol(ch: char) -> bool {
        Self::from_symbol(ch).is_some()
    }
}

/// One discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InputToken {
    /// Digit key
    Digit(Digit),
    /// Decimal point key
    Point,
    /// Operator or percent key
    Operator(Operator),
    /// Reset to `0`
    Clear,
    /// Delete the last character
    Backspace,
    /// Evaluate
    Equals,
}

impl InputToken {
    /// Identifier for this token, as accepted by [`FromStr`]
    #[must_use]
    pub fn identifier(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::Point => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Clear => "clear".to_string(),
            Self::Backspace => "backspace".to_string(),
            Self::Equals => "equals".to_string(),
        }
    }

    /// Parses a whitespace-separated list of identifiers
    pub fn parse_sequence(input: &str) -> InputResult<Vec<Self>> {
        input.split_whitespace().map(str::parse).collect()
    }
}

impl FromStr for InputToken {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "clear" => return Ok(Self::Clear),
            "backspace" => return Ok(Self::Backspace),
            "equals" => return Ok(Self::Equals),
            "." => return Ok(Self::Point),
            _ => {}
        }

        let mut chars = s.chars();
        let token = match (chars.next(), chars.next()) {
            (Some(ch), None) => Digit::from_char(ch)
                .map(Self::Digit)
                .or_else(|| Operator::from_symbol(ch).map(Self::Operator)),
            _ => None,
        };
        token.ok_or_else(|| InputError::UnknownToken(s.to_string()))
    }
}

impl TryFrom<String> for InputToken {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InputToken> for String {
    fn from(token: InputToken) -> Self {
        token.identifier()
    }
}

impl fmt::Display for InputToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_bounds() {
        assert_eq!(Digit::new(0).map(Digit::value), Some(0));
        assert_eq!(Digit::new(9).map(Digit::value), Some(9));
        assert!(Digit::new(10).is_none());
    }

    #[test]
    fn test_digit_chars() {
        let seven = Digit::from_char('7').unwrap();
        assert_eq!(seven.as_char(), '7');
        assert_eq!(seven.to_string(), "7");
        assert!(Digit::from_char('a').is_none());
        assert!(Digit::from_char('.').is_none());
    }

    #[test]
    fn test_operator_symbols() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
            assert!(Operator::is_symbol(op.symbol()));
        }
        assert!(!Operator::is_symbol('^'));
        assert!(!Operator::is_symbol('.'));
    }

    #[test]
    fn test_parse_named_tokens() {
        assert_eq!("clear".parse::<InputToken>(), Ok(InputToken::Clear));
        assert_eq!("backspace".parse::<InputToken>(), Ok(InputToken::Backspace));
        assert_eq!("equals".parse::<InputToken>(), Ok(InputToken::Equals));
        assert_eq!(".".parse::<InputToken>(), Ok(InputToken::Point));
    }

    #[test]
    fn test_parse_digits_and_operators() {
        assert_eq!(
            "4".parse::<InputToken>(),
            Ok(InputToken::Digit(Digit::new(4).unwrap()))
        );
        assert_eq!(
            "%".parse::<InputToken>(),
            Ok(InputToken::Operator(Operator::Percent))
        );
        assert_eq!(
            "-".parse::<InputToken>(),
            Ok(InputToken::Operator(Operator::Subtract))
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "Enter".parse::<InputToken>(),
            Err(InputError::UnknownToken("Enter".into()))
        );
        assert!("12".parse::<InputToken>().is_err());
        assert!("".parse::<InputToken>().is_err());
        assert!("^".parse::<InputToken>().is_err());
    }

    #[test]
    fn test_identifier_round_trip() {
        let tokens = InputToken::parse_sequence("1 2 + 3 . % - * / clear backspace equals")
            .unwrap();
        assert_eq!(tokens.len(), 12);
        for token in tokens {
            assert_eq!(token.identifier().parse::<InputToken>(), Ok(token));
        }
    }

    #[test]
    fn test_parse_sequence_reports_first_unknown() {
        assert_eq!(
            InputToken::parse_sequence("1 plus 2"),
            Err(InputError::UnknownToken("plus".into()))
        );
    }

    #[test]
    fn test_serde_uses_identifiers() {
        let tokens = vec![InputToken::Digit(Digit::new(5).unwrap()), InputToken::Equals];
        let json = serde_json::to_string(&tokens).unwrap();
        assert_eq!(json, r#"["5","equals"]"#);
        let back: Vec<InputToken> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tokens);
    }

    #[test]
    fn test_serde_rejects_unknown() {
        let result: Result<InputToken, _> = serde_json::from_str(r#""enter""#);
        assert!(result.is_err());
    }
}
