//! Calcpad CLI library
//!
//! Argument definitions, configuration and the subcommand handlers behind
//! the `calcpad` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, FormatArg, PressArgs, ReplayArgs};
pub use config::{CliConfig, ColorChoice, OutputFormat, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::{init_logging, LogConfig};
pub use output::Reporter;
