//! Error types for the CLI

use calcpad::core::CalcError;
use calcpad::input::InputError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Token identifier could not be parsed
    #[error("{0}")]
    Input(#[from] InputError),

    /// Expression passed to `eval` failed
    #[error("{0}")]
    Evaluation(#[from] CalcError),

    /// JSON output could not be rendered
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more replayed scenarios did not match
    #[error("{failed} of {total} scenarios failed")]
    ScenariosFailed {
        /// Number of failing scenarios
        failed: usize,
        /// Number of scenarios run
        total: usize,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }

    #[test]
    fn test_input_error_passes_message_through() {
        let err: CliError = InputError::UnknownToken("enter".into()).into();
        assert_eq!(err.to_string(), "Unknown input token 'enter'");
    }

    #[test]
    fn test_evaluation_error_from() {
        let err: CliError = CalcError::MalformedPercent.into();
        assert_eq!(err.to_string(), "Invalid percentage usage");
    }

    #[test]
    fn test_scenarios_failed_message() {
        let err = CliError::ScenariosFailed {
            failed: 2,
            total: 5,
        };
        assert_eq!(err.to_string(), "2 of 5 scenarios failed");
    }
}
