//! Eval command handler
//!
//! The expression is typed into a fresh session one key at a time, so the
//! result text, formatting and error handling match the interactive UI.

use deskcalc::core::{CalcError, CalcResult};
use deskcalc::session::{Action, Buffer, Session};
use serde::Serialize;
use tracing::debug;

use crate::commands::{EvalArgs, OutputFormat};
use crate::config::CliConfig;
use crate::error::CliResult;

/// Outcome of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalReport {
    /// The expression as given
    pub expression: String,
    /// What the calculator display shows afterwards
    pub display: String,
    /// The numeric result, when evaluation succeeded
    pub value: Option<f64>,
    /// Error category (`invalid_expression`, `evaluation_error`, ...)
    pub error: Option<&'static str>,
}

/// Types `expression` into `session` and presses `=`
///
/// Whitespace is skipped. Characters without an entry key (letters,
/// brackets, `=`, ...) reject the whole expression before anything is
/// typed, leaving the session untouched.
pub fn evaluate_expression(session: &mut Session, expression: &str) -> CalcResult<f64> {
    let mut keys = Vec::with_capacity(expression.len());
    for ch in expression.chars().filter(|ch| !ch.is_whitespace()) {
        match ch.to_string().parse::<Action>() {
            Ok(action @ (Action::Digit(_) | Action::Dot | Action::Operator(_))) => {
                keys.push(action);
            }
            _ => {
                debug!(%expression, %ch, "rejected before typing");
                return Err(CalcError::InvalidExpression(ch));
            }
        }
    }
    session.apply_all(keys);
    session.evaluate()
}

/// Evaluates with a session built from `config`
#[must_use]
pub fn build_report(config: &CliConfig, expression: &str) -> (EvalReport, CalcResult<f64>) {
    let mut session = config.session();
    let result = evaluate_expression(&mut session, expression);
    let display = if result.is_ok() {
        session.display()
    } else {
        Buffer::ERROR
    };
    let report = EvalReport {
        expression: expression.to_string(),
        display: display.to_string(),
        value: result.as_ref().ok().copied(),
        error: result.as_ref().err().map(CalcError::kind),
    };
    (report, result)
}

/// Execute the eval command
///
/// The display text is always printed; a failed evaluation is also
/// returned as an error so the process exits non-zero.
pub fn execute_eval(config: &CliConfig, args: &EvalArgs) -> CliResult<()> {
    let (report, result) = build_report(config, &args.expression);
    match args.format {
        OutputFormat::Text => println!("{}", report.display),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    result?;
    Ok(())
}
