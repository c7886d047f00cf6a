//! Desk calculator
//!
//! A four-function calculator with a running history, an optional memory
//! register and light/dark themes. The arithmetic is done by a small
//! dedicated parser restricted to `+ - * /` and decimal literals; nothing
//! here ever evaluates arbitrary code.
//!
//! Two variants exist. [`Variant::Basic`](session::Variant::Basic) has the
//! keypad, history panel and theme switch. [`Variant::Extended`](session::Variant::Extended)
//! adds the M+/M-/MR/MC keys, timestamped history and a clear-history button.
//!
//! # Example
//!
//! ```rust
//! use deskcalc::prelude::*;
//!
//! let mut session = Session::new(Variant::Extended);
//! for label in ["7", "/", "2", "=", "M+", "C", "MR"] {
//!     session.apply(label.parse().unwrap());
//! }
//! assert_eq!(session.display(), "3.5");
//! assert_eq!(session.history().latest().unwrap().display(), "7/2 = 3.5");
//!
//! session.apply(Action::Operator(Operation::Divide));
//! session.apply(Action::Digit(0));
//! session.apply(Action::Equals);
//! assert_eq!(session.display(), "Error");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod driver;
pub mod session;
pub mod theme;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::format::{format_memory, format_result};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::memory::MemoryRegister;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, Calculator, Operation};
    pub use crate::driver::{CalculatorDriver, HistoryItem};
    pub use crate::session::{Action, Buffer, InputState, MemoryOp, Session, Variant};
    pub use crate::theme::{ButtonRole, Palette, Rgb, Theme};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2 + 3"), Ok(5.0));
    }

    #[test]
    fn test_calculator_direct() {
        let calc = Calculator::new();
        assert_eq!(calc.apply(6.0, 7.0, Operation::Multiply), Ok(42.0));
    }

    #[test]
    fn test_parser_direct() {
        let ast = Parser::parse_str("1 + 2 * 3").unwrap();
        assert_eq!(Evaluator::new().evaluate(&ast), Ok(7.0));
    }

    #[test]
    fn test_session_end_to_end() {
        let mut session = Session::new(Variant::Basic);
        for label in ["2", "+", "2", "="] {
            session.apply(label.parse().unwrap());
        }
        assert_eq!(session.display(), "4");
        assert_eq!(session.history_lines(), vec!["2+2 = 4"]);
    }

    #[test]
    fn test_error_taxonomy_reaches_the_display() {
        let cases = ["5/0", "2+", "1..2"];
        for keys in cases {
            let mut session = Session::default();
            for ch in keys.chars() {
                session.apply(ch.to_string().parse().unwrap());
            }
            assert!(session.evaluate().is_err(), "{keys}");
            assert_eq!(session.display(), "Error");
            assert_eq!(session.state(), InputState::Error);
        }
    }
}
