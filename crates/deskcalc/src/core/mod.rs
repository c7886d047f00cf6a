//! Calculator core: parsing, evaluation, formatting, history and memory
//!
//! Nothing in here knows about rendering. Every type is plain data that a
//! front end (the terminal UI, the command line, tests) drives.

pub mod evaluator;
pub mod format;
pub mod history;
pub mod memory;
mod operations;
pub mod parser;

pub use operations::{Calculator, Operation};

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error taxonomy
///
/// Every variant is handled the same way by a [`crate::session::Session`]:
/// the display shows the `"Error"` sentinel and nothing propagates further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Expression contains a character outside `[0-9+\-*/. ]`
    #[error("Invalid expression: unexpected character '{0}'")]
    InvalidExpression(char),
    /// Expression is made of allowed characters but is not well formed
    #[error("Evaluation error: {0}")]
    EvaluationError(String),
    /// A step produced infinity or NaN (division by zero, overflow)
    #[error("Result is not finite")]
    NonFiniteResult,
    /// A memory operation was attempted on a non-numeric display
    #[error("Invalid operand: '{0}' is not a number")]
    InvalidOperand(String),
}

impl CalcError {
    /// Creates an evaluation error
    #[must_use]
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::EvaluationError(message.into())
    }

    /// Short machine-friendly name, used in structured log fields
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidExpression(_) => "invalid_expression",
            Self::EvaluationError(_) => "evaluation_error",
            Self::NonFiniteResult => "non_finite_result",
            Self::InvalidOperand(_) => "invalid_operand",
        }
    }
}
