//! deskcalc command-line front end
//!
//! Argument parsing, configuration, logging setup and the handlers behind
//! each subcommand. The binary in `main.rs` only wires these together.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;

pub use commands::{
    Cli, Commands, ConfigArgs, EvalArgs, OutputFormat, PressArgs, RunArgs, SessionArgs, ThemeArg,
    VariantArg,
};
pub use config::{CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::LogTarget;
