//! Subcommand handlers
//!
//! Each command is split into a pure step that returns a serializable
//! report and a printing step that renders it as text or JSON.

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

use calcpad::accumulator::{Accumulator, ERROR_DISPLAY};
use calcpad::core::evaluator::Evaluator;
use calcpad::core::CalcError;
use calcpad::driver::{builtin_scenarios, load_scenarios, run_scenario, Scenario, ScenarioOutcome};
use calcpad::input::InputToken;
use serde::{Serialize, Serializer};
use tracing::{debug, info, warn};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;

/// Lines that end a REPL session
const REPL_EXIT: [&str; 2] = ["quit", "exit"];

/// Displays produced by pressing a token list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PressReport {
    /// Display after the last token
    pub display: String,
    /// Display after each token
    pub steps: Vec<String>,
}

/// Result of evaluating an expression string
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalReport {
    /// Expression as given
    pub expression: String,
    /// Display string, `Error` on failure
    pub display: String,
    /// Failure reason
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_error"
    )]
    pub error: Option<CalcError>,
}

fn serialize_error<S: Serializer>(error: &Option<CalcError>, serializer: S) -> Result<S::Ok, S::Error> {
    match error {
        Some(err) => serializer.collect_str(err),
        None => serializer.serialize_none(),
    }
}

/// A scenario source that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    /// File path
    pub source: String,
    /// Error message
    pub message: String,
}

/// Results of a replay run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    /// One entry per scenario run
    pub outcomes: Vec<ScenarioOutcome>,
    /// Files that could not be loaded
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub load_failures: Vec<LoadFailure>,
}

impl ReplayReport {
    /// Number of passing scenarios
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Number of failing scenarios plus unreadable files
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed() + self.load_failures.len()
    }
}

/// Parses token arguments; each may hold several space-separated tokens
pub fn parse_tokens<S: AsRef<str>>(args: &[S]) -> CliResult<Vec<InputToken>> {
    let mut tokens = Vec::new();
    for arg in args {
        tokens.extend(InputToken::parse_sequence(arg.as_ref())?);
    }
    Ok(tokens)
}

/// Presses tokens on `calc`, recording the display after each
pub fn press_tokens(calc: &mut Accumulator, tokens: &[InputToken]) -> PressReport {
    let steps: Vec<String> = tokens
        .iter()
        .map(|token| calc.press(*token).to_string())
        .collect();
    PressReport {
        display: calc.display().to_string(),
        steps,
    }
}

/// Evaluates an expression with the same pipeline `equals` uses
#[must_use]
pub fn eval_expression(expression: &str) -> EvalReport {
    match Evaluator::new().calculate_display(expression) {
        Ok(display) => EvalReport {
            expression: expression.to_string(),
            display,
            error: None,
        },
        Err(err) => {
            debug!(expression, kind = err.kind(), "evaluation failed");
            EvalReport {
                expression: expression.to_string(),
                display: ERROR_DISPLAY.to_string(),
                error: Some(err),
            }
        }
    }
}

/// Replays scenarios from files, or the built-in set when `files` is empty
pub fn replay(files: &[PathBuf], fail_fast: bool) -> ReplayReport {
    let mut report = ReplayReport::default();
    let mut calc = Accumulator::new();

    if files.is_empty() {
        run_all(&mut calc, &builtin_scenarios(), fail_fast, &mut report);
        return report;
    }

    for path in files {
        match load_scenarios(path) {
            Ok(scenarios) => {
                info!(file = %path.display(), count = scenarios.len(), "loaded scenarios");
                if !run_all(&mut calc, &scenarios, fail_fast, &mut report) {
                    break;
                }
            }
            Err(err) => {
                warn!(file = %path.display(), error = %err, "could not load scenarios");
                report.load_failures.push(LoadFailure {
                    source: path.display().to_string(),
                    message: err.to_string(),
                });
                if fail_fast {
                    break;
                }
            }
        }
    }
    report
}

/// Runs scenarios into `report`; false if fail-fast stopped early
fn run_all(
    calc: &mut Accumulator,
    scenarios: &[Scenario],
    fail_fast: bool,
    report: &mut ReplayReport,
) -> bool {
    for scenario in scenarios {
        let outcome = run_scenario(calc, scenario);
        let passed = outcome.passed();
        report.outcomes.push(outcome);
        if fail_fast && !passed {
            return false;
        }
    }
    true
}

/// `calcpad press`
pub fn run_press(config: &CliConfig, reporter: &Reporter, args: &[String]) -> CliResult<()> {
    let tokens = parse_tokens(args)?;
    let report = press_tokens(&mut Accumulator::new(), &tokens);
    if config.format.is_json() {
        reporter.line(&serde_json::to_string(&report)?);
    } else {
        reporter.display(&report.display);
    }
    Ok(())
}

/// `calcpad eval`; fails after printing if the expression does not evaluate
pub fn run_eval(config: &CliConfig, reporter: &Reporter, expression: &str) -> CliResult<()> {
    let report = eval_expression(expression);
    if config.format.is_json() {
        reporter.line(&serde_json::to_string(&report)?);
    } else {
        reporter.display(&report.display);
    }
    match report.error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

/// Whether `repl` greets the user before reading input
#[must_use]
pub const fn shows_repl_banner(config: &CliConfig, interactive: bool) -> bool {
    interactive && !config.verbosity.is_quiet()
}

/// `calcpad repl`: one display per input line until `quit` or end of input.
///
/// `interactive` is true when `input` is a terminal.
pub fn run_repl<R: BufRead>(
    config: &CliConfig,
    reporter: &Reporter,
    input: R,
    interactive: bool,
) -> CliResult<()> {
    let mut calc = Accumulator::new();

    if shows_repl_banner(config, interactive) {
        eprintln!("calcpad: enter tokens (0-9 . + - * / % clear backspace equals), 'quit' to exit");
    }

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if REPL_EXIT.contains(&line) {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match parse_tokens(&[line]) {
            Ok(tokens) => {
                let report = press_tokens(&mut calc, &tokens);
                if config.format.is_json() {
                    reporter.line(&serde_json::to_string(&report)?);
                } else {
                    reporter.display(&report.display);
                }
            }
            Err(err) => eprintln!("Error: {err}"),
        }
    }
    Ok(())
}

/// `calcpad replay`
pub fn run_replay(
    config: &CliConfig,
    reporter: &Reporter,
    files: &[PathBuf],
) -> CliResult<()> {
    let start = Instant::now();
    let report = replay(files, config.fail_fast);

    if config.format.is_json() {
        reporter.line(&serde_json::to_string_pretty(&report)?);
    } else {
        for failure in &report.load_failures {
            reporter.load_failure(&failure.source, &failure.message);
        }
        for outcome in &report.outcomes {
            reporter.outcome(outcome);
        }
        reporter.summary(report.passed(), report.failed(), start.elapsed());
    }

    match report.failed() {
        0 => Ok(()),
        failed => Err(CliError::ScenariosFailed {
            failed,
            total: report.outcomes.len() + report.load_failures.len(),
        }),
    }
}
