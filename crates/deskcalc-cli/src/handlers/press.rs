//! Press command handler

use deskcalc::core::history::HistoryEntry;
use deskcalc::session::{Action, Session};
use serde::Serialize;

use crate::commands::{OutputFormat, PressArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Final state after a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PressReport {
    /// Display text
    pub display: String,
    /// Memory register, extended variant only
    pub memory: Option<f64>,
    /// History lines as the panel shows them, newest first
    pub lines: Vec<String>,
    /// Raw history entries, newest first
    pub history: Vec<HistoryEntry>,
}

impl PressReport {
    /// Captures the observable state of `session`
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self {
            display: session.display().to_string(),
            memory: session.memory_value(),
            lines: session.history_lines(),
            history: session.history().iter().cloned().collect(),
        }
    }

    /// Display on the first line, then one line per history entry
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = self.display.clone();
        for line in &self.lines {
            out.push('\n');
            out.push_str(line);
        }
        out
    }
}

/// Parses button labels, failing on the first unknown one
pub fn parse_labels(labels: &[String]) -> CliResult<Vec<Action>> {
    labels
        .iter()
        .map(|label| label.parse::<Action>().map_err(CliError::invalid_argument))
        .collect()
}

/// Presses every action in order on a session built from `config`
#[must_use]
pub fn replay(config: &CliConfig, actions: &[Action]) -> Session {
    let mut session = config.session();
    session.apply_all(actions.iter().copied());
    session
}

/// Execute the press command
pub fn execute_press(config: &CliConfig, args: &PressArgs) -> CliResult<()> {
    let actions = parse_labels(&args.labels)?;
    let report = PressReport::from_session(&replay(config, &actions));
    match args.format {
        OutputFormat::Text => println!("{}", report.render_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
