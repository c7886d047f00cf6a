//! Terminal front end
//!
//! A full-screen ratatui rendition of the desktop window: display, keypad,
//! history panel and the two toggles. The event loop itself lives in the
//! binary; everything here is testable with `TestBackend`.

mod app;
mod input;
mod keypad;
mod ui;

pub use app::CalculatorApp;
pub use input::{InputHandler, KeyAction};
pub use keypad::{Keypad, KeypadButton, KeypadWidget};
pub use ui::{keypad_rect, render, CalculatorUI};
