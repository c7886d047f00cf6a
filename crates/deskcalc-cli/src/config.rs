//! CLI configuration

use std::path::PathBuf;

use deskcalc::session::{Session, Variant};
use deskcalc::theme::Theme;
use serde::{Deserialize, Serialize};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - calculator decisions
    Verbose,
    /// Debug - every transition
    Debug,
}

impl Verbosity {
    /// Builds the level from `-q` and the `-v` count; quiet wins
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default `EnvFilter` directive for this level
    #[must_use]
    pub const fn log_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "deskcalc=debug,deskcalc_cli=debug",
            Self::Debug => "trace",
        }
    }
}

/// Effective configuration of one invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Calculator variant
    pub variant: Variant,
    /// Starting theme
    pub theme: Theme,
    /// Whether the history panel starts visible
    pub show_history: bool,
    /// Where TUI logs go; none disables logging in the TUI
    pub log_file: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::Normal,
            variant: Variant::Basic,
            theme: Theme::Light,
            show_history: true,
            log_file: None,
        }
    }
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the calculator variant
    #[must_use]
    pub const fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the starting theme
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set history panel visibility
    #[must_use]
    pub const fn with_show_history(mut self, show: bool) -> Self {
        self.show_history = show;
        self
    }

    /// Set the log file
    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// A fresh session configured from these settings
    #[must_use]
    pub fn session(&self) -> Session {
        Session::new(self.variant)
            .with_theme(self.theme)
            .with_history_visible(self.show_history)
    }
}
