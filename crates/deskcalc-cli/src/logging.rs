//! Log subscriber setup
//!
//! Non-interactive commands log to stderr. The terminal UI owns the
//! screen, so it logs to `--log-file` or not at all.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;
use crate::error::{CliError, CliResult};

/// Environment variable that overrides the level from `-v`/`-q`
pub const LOG_ENV: &str = "DESKCALC_LOG";

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error
    Stderr,
    /// Append to a file, without ANSI colours
    File(PathBuf),
    /// No subscriber is installed
    Off,
}

impl LogTarget {
    /// Target for the interactive UI
    #[must_use]
    pub fn for_tui(log_file: Option<&Path>) -> Self {
        log_file.map_or(Self::Off, |path| Self::File(path.to_path_buf()))
    }
}

/// Filter from `DESKCALC_LOG`, falling back to the verbosity level
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()))
}

/// Installs the global subscriber
pub fn init(verbosity: Verbosity, target: &LogTarget) -> CliResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_target(false);

    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(open_log(path)?))
            .try_init(),
    };
    installed.map_err(|err| CliError::logging(err.to_string()))
}

fn open_log(path: &Path) -> CliResult<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
