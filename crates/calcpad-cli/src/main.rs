//! Calcpad: keypad calculator on the command line
//!
//! ## Usage
//!
//! ```bash
//! calcpad press 1 0 0 + 1 0 % equals   # 110
//! calcpad eval "5*-2"                  # -10
//! calcpad repl                         # one line of tokens at a time
//! calcpad replay scenarios.yaml        # check scripted sessions
//! ```

use calcpad_cli::{
    handlers, init_logging, Cli, CliConfig, CliResult, ColorChoice, Commands, LogConfig,
    OutputFormat, Reporter, Verbosity,
};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);

    init_logging(&LogConfig::from_verbosity(config.verbosity).with_ansi(config.color.should_color()));
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());

    match cli.command {
        Commands::Press(args) => handlers::run_press(&config, &reporter, &args.tokens),
        Commands::Eval(args) => handlers::run_eval(&config, &reporter, &args.expression),
        Commands::Repl => {
            let stdin = std::io::stdin();
            let interactive = stdin.is_terminal();
            handlers::run_repl(&config, &reporter, stdin.lock(), interactive)
        }
        Commands::Replay(args) => {
            let config = config.with_fail_fast(args.fail_fast);
            handlers::run_replay(&config, &reporter, &args.files)
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.into();
    let format: OutputFormat = cli.format.into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_format(format)
}
