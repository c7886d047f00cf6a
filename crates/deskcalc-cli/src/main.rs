//! deskcalc: keypad calculator for the terminal
//!
//! ## Usage
//!
//! ```bash
//! deskcalc run --variant extended   # Interactive calculator
//! deskcalc eval "2+3*4"             # Prints 14
//! deskcalc press 9 M+ C MR          # Replays buttons
//! deskcalc config                   # Effective settings as JSON
//! ```

use clap::Parser;
use deskcalc_cli::{
    handlers::{config::execute_config, eval::execute_eval, press::execute_press, run::execute_run},
    logging, Cli, CliConfig, CliResult, Commands, LogTarget, Verbosity,
};
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

    let target = match &cli.command {
        Commands::Run(_) => LogTarget::for_tui(config.log_file.as_deref()),
        _ => LogTarget::Stderr,
    };
    logging::init(config.verbosity, &target)?;

    match &cli.command {
        Commands::Run(_) => execute_run(&config),
        Commands::Eval(args) => execute_eval(&config, args),
        Commands::Press(args) => execute_press(&config, args),
        Commands::Config(_) => execute_config(&config),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let session = cli.command.session_args();
    let log_file = match &cli.command {
        Commands::Run(args) => args.log_file.clone(),
        _ => None,
    };

    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_variant(session.variant.into())
        .with_theme(session.theme.into())
        .with_show_history(!session.hide_history)
        .with_log_file(log_file)
}
