//! Scripted calculator sessions
//!
//! Write a key sequence once, replay it against anything that accepts
//! tokens. A [`Scenario`] is a named token list plus the display expected
//! at the end (and optionally after every token). Scenarios load from JSON
//! or YAML so they can live next to a front end's own test assets.
//!
//! ```yaml
//! name: percent of base
//! tokens: ["1", "0", "0", "+", "1", "0", "%", "equals"]
//! expect: "110"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::accumulator::Accumulator;
use crate::input::InputToken;

/// Result type for scenario loading
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors raised while loading scenario files
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// File could not be read
    #[error("Failed to read scenario file '{path}': {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// JSON content is invalid
    #[error("Invalid JSON scenario: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML content is invalid
    #[error("Invalid YAML scenario: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Extension is neither JSON nor YAML
    #[error("Unsupported scenario format '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(String),

    /// `steps` does not line up with `tokens`
    #[error("Scenario '{name}' has {steps} steps for {tokens} tokens")]
    StepMismatch {
        /// Scenario name
        name: String,
        /// Number of expected steps
        steps: usize,
        /// Number of tokens
        tokens: usize,
    },
}

/// Anything that takes calculator tokens and shows a display string
pub trait CalculatorDriver {
    /// Applies one token and returns the display afterwards
    fn press(&mut self, token: InputToken) -> String;

    /// Current display
    fn display(&self) -> String;

    /// Returns to the initial state
    fn reset(&mut self);

    /// Applies tokens in order and returns the final display
    fn press_all(&mut self, tokens: &[InputToken]) -> String {
        for token in tokens {
            self.press(*token);
        }
        self.display()
    }
}

impl CalculatorDriver for Accumulator {
    fn press(&mut self, token: InputToken) -> String {
        Accumulator::press(self, token).to_string()
    }

    fn display(&self) -> String {
        Accumulator::display(self).to_string()
    }

    fn reset(&mut self) {
        self.clear();
    }
}

/// A named key sequence with its expected outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Human-readable name
    pub name: String,
    /// Tokens to press, in order
    pub tokens: Vec<InputToken>,
    /// Display expected after the last token
    pub expect: String,
    /// Display expected after each token, if checked step by step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
}

impl Scenario {
    /// Creates a scenario from whitespace-separated token identifiers.
    ///
    /// Returns `None` if any identifier is unknown.
    #[must_use]
    pub fn new(name: impl Into<String>, tokens: &str, expect: impl Into<String>) -> Option<Self> {
        Some(Self {
            name: name.into(),
            tokens: InputToken::parse_sequence(tokens).ok()?,
            expect: expect.into(),
            steps: None,
        })
    }

    /// Adds per-token expectations
    #[must_use]
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps = Some(steps.into_iter().map(Into::into).collect());
        self
    }

    /// Checks that `steps`, when present, has one entry per token
    pub fn validate(&self) -> ScenarioResult<()> {
        match &self.steps {
            Some(steps) if steps.len() != self.tokens.len() => Err(ScenarioError::StepMismatch {
                name: self.name.clone(),
                steps: steps.len(),
                tokens: self.tokens.len(),
            }),
            _ => Ok(()),
        }
    }
}

/// Outcome of replaying one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioOutcome {
    /// Scenario name
    pub name: String,
    /// Expected final display
    pub expected: String,
    /// Actual final display
    pub actual: String,
    /// First step whose display differed: (token index, expected, actual)
    pub first_mismatch: Option<(usize, String, String)>,
}

impl ScenarioOutcome {
    /// True when the final display and every checked step matched
    #[must_use]
    pub fn passed(&self) -> bool {
        self.first_mismatch.is_none() && self.expected == self.actual
    }
}

/// Replays a scenario on a freshly reset driver
pub fn run_scenario<D: CalculatorDriver>(driver: &mut D, scenario: &Scenario) -> ScenarioOutcome {
    driver.reset();
    let mut first_mismatch = None;

    for (index, token) in scenario.tokens.iter().enumerate() {
        let shown = driver.press(*token);
        let expected_step = scenario.steps.as_ref().and_then(|steps| steps.get(index));
        if let Some(expected) = expected_step {
            if first_mismatch.is_none() && *expected != shown {
                first_mismatch = Some((index, expected.clone(), shown));
            }
        }
    }

    let outcome = ScenarioOutcome {
        name: scenario.name.clone(),
        expected: scenario.expect.clone(),
        actual: driver.display(),
        first_mismatch,
    };
    debug!(scenario = %outcome.name, passed = outcome.passed(), "scenario replayed");
    outcome
}

/// Parses scenarios from JSON text: a single object or an array
pub fn scenarios_from_json(text: &str) -> ScenarioResult<Vec<Scenario>> {
    let scenarios = match serde_json::from_str::<OneOrMany>(text)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(list) => list,
    };
    validate_all(scenarios)
}

/// Parses scenarios from YAML text: a single mapping or a sequence
pub fn scenarios_from_yaml(text: &str) -> ScenarioResult<Vec<Scenario>> {
    let scenarios = match serde_yaml_ng::from_str::<OneOrMany>(text)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(list) => list,
    };
    validate_all(scenarios)
}

/// Loads scenarios from a `.json`, `.yaml` or `.yml` file
pub fn load_scenarios(path: &Path) -> ScenarioResult<Vec<Scenario>> {
    let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "json" => scenarios_from_json(&text),
        "yaml" | "yml" => scenarios_from_yaml(&text),
        other => Err(ScenarioError::UnsupportedFormat(other.to_string())),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Scenario),
    Many(Vec<Scenario>),
}

fn validate_all(scenarios: Vec<Scenario>) -> ScenarioResult<Vec<Scenario>> {
    for scenario in &scenarios {
        scenario.validate()?;
    }
    Ok(scenarios)
}

/// Reference sessions covering the documented keypad behavior
#[must_use]
pub fn builtin_scenarios() -> Vec<Scenario> {
    [
        ("addition", "1 2 + 3 equals", "15"),
        ("negative operand", "5 * - 2 equals", "-10"),
        ("standalone percent", "5 0 % equals", "0.5"),
        ("percent of base", "1 0 0 + 1 0 % equals", "110"),
        ("division by zero", "5 / 0 equals", "Error"),
        ("decimal guard", "1 . 5 + 2 . .", "1.5+2."),
        ("operator replacement", "7 + * 2 equals", "14"),
        ("replace negative marker", "7 * - + 2 equals", "9"),
        ("float noise rounded", "0 . 1 + 0 . 2 equals", "0.3"),
        ("trailing operator ignored", "9 * equals", "9"),
        ("repeat equals", "2 / 4 equals equals", "0.5"),
        ("backspace after result", "2 + 2 equals backspace", "0"),
        ("recover after error", "5 / 0 equals 7", "7"),
        ("clear then backspace", "4 2 clear backspace backspace", "0"),
    ]
    .into_iter()
    .filter_map(|(name, tokens, expect)| Scenario::new(name, tokens, expect))
    .collect()
}
