//! CLI command definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use deskcalc::session::Variant;
use deskcalc::theme::Theme;

/// deskcalc: a keypad calculator for the terminal
#[derive(Parser, Debug)]
#[command(name = "deskcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive calculator
    Run(RunArgs),

    /// Evaluate one expression and print the display
    Eval(EvalArgs),

    /// Replay button presses and print the final display and history
    Press(PressArgs),

    /// Show the effective configuration as JSON
    Config(ConfigArgs),
}

impl Commands {
    /// Session options shared by every subcommand
    #[must_use]
    pub const fn session_args(&self) -> &SessionArgs {
        match self {
            Self::Run(args) => &args.session,
            Self::Eval(args) => &args.session,
            Self::Press(args) => &args.session,
            Self::Config(args) => &args.session,
        }
    }
}

/// Calculator variant
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VariantArg {
    /// Keypad, history panel and theme switch
    #[default]
    Basic,
    /// Adds memory keys, timestamps and clear-history
    Extended,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Basic => Self::Basic,
            VariantArg::Extended => Self::Extended,
        }
    }
}

/// Colour theme
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeArg {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

/// Output format for non-interactive commands
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Options that configure the calculator session
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Calculator variant
    #[arg(long, value_enum, env = "DESKCALC_VARIANT", default_value = "basic")]
    pub variant: VariantArg,

    /// Starting theme
    #[arg(long, value_enum, env = "DESKCALC_THEME", default_value = "light")]
    pub theme: ThemeArg,

    /// Start with the history panel hidden
    #[arg(long)]
    pub hide_history: bool,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Session options
    #[command(flatten)]
    pub session: SessionArgs,

    /// Write logs to this file (the terminal is in use)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Expression using digits, `.`, `+ - * /` and spaces
    #[arg(allow_hyphen_values = true)]
    pub expression: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Session options
    #[command(flatten)]
    pub session: SessionArgs,
}

/// Arguments for the press command
#[derive(Parser, Debug)]
pub struct PressArgs {
    /// Button labels, e.g. `7 + 2 = M+ C MR`
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub labels: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Session options
    #[command(flatten)]
    pub session: SessionArgs,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Session options
    #[command(flatten)]
    pub session: SessionArgs,
}
