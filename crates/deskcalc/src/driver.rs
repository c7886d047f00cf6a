//! One set of behavior checks, many front ends
//!
//! [`CalculatorDriver`] is the narrow surface every front end exposes:
//! press a button, read the display, read the history. The `verify_*`
//! functions below are written once against that surface and run against
//! both the bare [`Session`] and the terminal UI.

use crate::core::Operation;
use crate::session::{Action, MemoryOp, Session};

/// Abstract driver for calculator interactions
pub trait CalculatorDriver {
    /// Presses one button
    fn press(&mut self, action: Action);

    /// Current display text
    fn display(&self) -> String;

    /// History entries, newest first
    fn history(&self) -> Vec<HistoryItem>;

    /// Types each character of `keys` as a button press
    ///
    /// `=` evaluates, `C` clears and `<` stands for backspace; anything
    /// without a button is skipped.
    fn type_keys(&mut self, keys: &str) {
        for ch in keys.chars() {
            let action = match ch {
                '<' => Some(Action::Backspace),
                _ => ch.to_string().parse().ok(),
            };
            if let Some(action) = action {
                self.press(action);
            }
        }
    }
}

/// A history entry as seen through a driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// The expression that was evaluated
    pub expression: String,
    /// The result text
    pub result: String,
}

fn items(session: &Session) -> Vec<HistoryItem> {
    session
        .history()
        .iter()
        .map(|entry| HistoryItem {
            expression: entry.expression.clone(),
            result: entry.result.clone(),
        })
        .collect()
}

impl CalculatorDriver for Session {
    fn press(&mut self, action: Action) {
        self.apply(action);
    }

    fn display(&self) -> String {
        Session::display(self).to_string()
    }

    fn history(&self) -> Vec<HistoryItem> {
        items(self)
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use super::{items, CalculatorDriver, HistoryItem};
    use crate::session::{Action, Variant};
    use crate::tui::CalculatorApp;

    /// Drives the terminal app through real key events
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a driver for a fresh app of `variant`
        #[must_use]
        pub fn new(variant: Variant) -> Self {
            Self {
                app: CalculatorApp::new(variant),
            }
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub const fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub const fn app(&self) -> &CalculatorApp {
            &self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        /// Buttons without a key binding (memory keys in the basic
        /// variant) do nothing, as on the keypad
        fn press(&mut self, action: Action) {
            if let Some(key) = self.app.input_handler().key_for(action) {
                self.app.handle_key(key);
            }
        }

        fn display(&self) -> String {
            self.app.session().display().to_string()
        }

        fn history(&self) -> Vec<HistoryItem> {
            items(self.app.session())
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Shared behavior checks =====
// These work with ANY CalculatorDriver implementation

/// Four operations, integer and fractional results
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    let cases = [
        ("2+3=", "5"),
        ("10-4=", "6"),
        ("6*7=", "42"),
        ("20/4=", "5"),
        ("7/2=", "3.5"),
        ("1/3=", "0.3333333333"),
        ("3-5=", "-2"),
    ];
    for (keys, expected) in cases {
        driver.press(Action::Clear);
        driver.type_keys(keys);
        assert_eq!(driver.display(), expected, "keys: {keys}");
    }
    driver.press(Action::Clear);
}

/// `*` and `/` bind tighter; equal precedence is left to right
pub fn verify_precedence<D: CalculatorDriver>(driver: &mut D) {
    let cases = [("2+3*4=", "14"), ("10-6/2=", "7"), ("10-4-3=", "3"), ("100/10/5=", "2")];
    for (keys, expected) in cases {
        driver.press(Action::Clear);
        driver.type_keys(keys);
        assert_eq!(driver.display(), expected, "keys: {keys}");
    }
    driver.press(Action::Clear);
}

/// Failures show `Error`, record nothing and are recoverable
pub fn verify_error_recovery<D: CalculatorDriver>(driver: &mut D) {
    driver.press(Action::Clear);
    let before = driver.history().len();

    driver.type_keys("5/0=");
    assert_eq!(driver.display(), "Error");
    assert_eq!(driver.history().len(), before);

    driver.press(Action::Backspace);
    assert_eq!(driver.display(), "0");

    driver.type_keys("2+=");
    assert_eq!(driver.display(), "Error");
    driver.press(Action::Operator(Operation::Add));
    assert_eq!(driver.display(), "0+");

    driver.type_keys("1=");
    assert_eq!(driver.display(), "1");

    driver.type_keys("1..2=");
    assert_eq!(driver.display(), "Error");
    driver.press(Action::Digit(8));
    assert_eq!(driver.display(), "8");
    driver.press(Action::Clear);
}

/// Backspace trims one character and never empties the display
pub fn verify_backspace<D: CalculatorDriver>(driver: &mut D) {
    driver.press(Action::Clear);
    driver.type_keys("12");
    driver.press(Action::Backspace);
    assert_eq!(driver.display(), "1");
    driver.press(Action::Backspace);
    assert_eq!(driver.display(), "0");
    driver.press(Action::Backspace);
    assert_eq!(driver.display(), "0");
}

/// History is newest first and keeps ten entries
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    for i in 0..=10u8 {
        driver.press(Action::Clear);
        driver.press(Action::Digit(i % 10));
        driver.type_keys("+1=");
    }

    let history = driver.history();
    assert_eq!(history.len(), 10);
    assert_eq!(
        history[0],
        HistoryItem {
            expression: "0+1".into(),
            result: "1".into(),
        }
    );
    assert_eq!(history[9].expression, "1+1");
    driver.press(Action::Clear);
}

/// M+ / MR / MC round trip; requires a driver with memory keys
pub fn verify_memory<D: CalculatorDriver>(driver: &mut D) {
    driver.press(Action::Clear);
    driver.press(Action::Memory(MemoryOp::Clear));
    driver.type_keys("4");
    driver.press(Action::Memory(MemoryOp::Add));
    driver.press(Action::Clear);
    driver.press(Action::Memory(MemoryOp::Recall));
    assert_eq!(driver.display(), "4.0");

    driver.press(Action::Memory(MemoryOp::Clear));
    driver.press(Action::Memory(MemoryOp::Recall));
    assert_eq!(driver.display(), "0.0");

    driver.type_keys("1/0=");
    driver.press(Action::Memory(MemoryOp::Add));
    assert_eq!(driver.display(), "Error");
    driver.press(Action::Clear);
}

/// Everything that holds for both variants
pub fn run_all_checks<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_precedence(driver);
    verify_error_recovery(driver);
    verify_backspace(driver);
    verify_history(driver);
}
