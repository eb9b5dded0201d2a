//! Output formatting for displays and scenario results

use std::time::Duration;

use calcpad::driver::ScenarioOutcome;
use console::{style, Style, Term};

/// Writes results to stdout, styled when colors are on
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Print a calculator display. Printed even in quiet mode.
    pub fn display(&self, text: &str) {
        let line = if self.use_color && text == calcpad::accumulator::ERROR_DISPLAY {
            style(text).red().bold().to_string()
        } else {
            text.to_string()
        };
        let _ = self.term.write_line(&line);
    }

    /// Print a raw line, e.g. a JSON document
    pub fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    /// Print one scenario result. Passes are hidden in quiet mode.
    pub fn outcome(&self, outcome: &ScenarioOutcome) {
        if self.quiet && outcome.passed() {
            return;
        }
        let _ = self.term.write_line(&self.format_outcome(outcome));
    }

    /// Print a scenario source that could not be loaded
    pub fn load_failure(&self, source: &str, message: &str) {
        let prefix = self.prefix(false);
        let _ = self.term.write_line(&format!("{prefix} {source}: {message}"));
    }

    /// Render one scenario result line
    #[must_use]
    pub fn format_outcome(&self, outcome: &ScenarioOutcome) -> String {
        let prefix = self.prefix(outcome.passed());
        match &outcome.first_mismatch {
            _ if outcome.passed() => format!("{prefix} {}", outcome.name),
            Some((index, expected, actual)) => format!(
                "{prefix} {}: after token {} expected '{expected}', got '{actual}'",
                outcome.name,
                index + 1
            ),
            None => format!(
                "{prefix} {}: expected '{}', got '{}'",
                outcome.name, outcome.expected, outcome.actual
            ),
        }
    }

    /// Print the replay summary
    pub fn summary(&self, passed: usize, failed: usize, duration: Duration) {
        if self.quiet && failed == 0 {
            return;
        }
        let _ = self.term.write_line("");
        let _ = self
            .term
            .write_line(&self.format_summary(passed, failed, duration));
    }

    /// Render the replay summary line
    #[must_use]
    pub fn format_summary(&self, passed: usize, failed: usize, duration: Duration) -> String {
        let total = passed + failed;
        let secs = duration.as_secs_f64();

        if self.use_color {
            let passed_style = Style::new().green().bold();
            let failed_style = Style::new().red().bold();
            let status = if failed > 0 {
                failed_style.apply_to("FAILED")
            } else {
                passed_style.apply_to("PASSED")
            };
            format!(
                "{status} {total} scenarios in {secs:.2}s ({} passed, {} failed)",
                passed_style.apply_to(passed),
                if failed > 0 {
                    failed_style.apply_to(failed).to_string()
                } else {
                    failed.to_string()
                }
            )
        } else {
            let status = if failed > 0 { "FAILED" } else { "PASSED" };
            format!(
                "{status} {total} scenarios in {secs:.2}s ({passed} passed, {failed} failed)"
            )
        }
    }

    fn prefix(&self, passed: bool) -> String {
        match (self.use_color, passed) {
            (true, true) => style("✓").green().bold().to_string(),
            (true, false) => style("✗").red().bold().to_string(),
            (false, true) => "PASS".to_string(),
            (false, false) => "FAIL".to_string(),
        }
    }
}
