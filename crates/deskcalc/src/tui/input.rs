//! Keyboard mapping
//!
//! | Key                    | Action                     |
//! |------------------------|----------------------------|
//! | `0`-`9` `.` `+-*/`     | same as the keypad button  |
//! | Enter, `=`             | `=`                        |
//! | Backspace              | `⌫`                        |
//! | Esc                    | `C`                        |
//! | `t`                    | toggle theme               |
//! | `h`                    | show/hide history          |
//! | `m` `n` `r` `z`        | M+ M- MR MC (extended)     |
//! | Ctrl+L                 | clear history (extended)   |
//! | Ctrl+C, Ctrl+Q         | quit                       |

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::Operation;
use crate::session::{Action, MemoryOp, Variant};

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Apply an action to the session
    Press(Action),
    /// Leave the application
    Quit,
    /// Key has no binding
    None,
}

/// Maps key events to actions for one calculator variant
#[derive(Debug, Default, Clone, Copy)]
pub struct InputHandler {
    variant: Variant,
}

impl InputHandler {
    /// Creates a handler for `variant`
    #[must_use]
    pub const fn new(variant: Variant) -> Self {
        Self { variant }
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('l') if self.variant.can_clear_history() => {
                    KeyAction::Press(Action::ClearHistory)
                }
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char(c) => self.map_char(c).map_or(KeyAction::None, KeyAction::Press),
            KeyCode::Enter => KeyAction::Press(Action::Equals),
            KeyCode::Backspace => KeyAction::Press(Action::Backspace),
            KeyCode::Esc => KeyAction::Press(Action::Clear),
            _ => KeyAction::None,
        }
    }

    fn map_char(&self, c: char) -> Option<Action> {
        if let Some(d) = c.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
            return Some(Action::Digit(d));
        }
        if let Some(op) = Operation::from_char(c) {
            return Some(Action::Operator(op));
        }

        let memory = |op| self.variant.has_memory().then_some(Action::Memory(op));
        match c {
            '.' => Some(Action::Dot),
            '=' => Some(Action::Equals),
            't' | 'T' => Some(Action::ToggleTheme),
            'h' | 'H' => Some(Action::ToggleHistory),
            'm' | 'M' => memory(MemoryOp::Add),
            'n' | 'N' => memory(MemoryOp::Subtract),
            'r' | 'R' => memory(MemoryOp::Recall),
            'z' | 'Z' => memory(MemoryOp::Clear),
            _ => None,
        }
    }

    /// Key event that produces `action`, if one is bound
    ///
    /// Used to drive the terminal front end from button labels.
    #[must_use]
    pub fn key_for(&self, action: Action) -> Option<KeyEvent> {
        let plain = |code| Some(KeyEvent::new(code, KeyModifiers::NONE));
        match action {
            Action::Digit(d) => {
                char::from_digit(u32::from(d), 10).and_then(|c| plain(KeyCode::Char(c)))
            }
            Action::Dot => plain(KeyCode::Char('.')),
            Action::Operator(op) => plain(KeyCode::Char(op.symbol())),
            Action::Equals => plain(KeyCode::Enter),
            Action::Backspace => plain(KeyCode::Backspace),
            Action::Clear => plain(KeyCode::Esc),
            Action::ToggleTheme => plain(KeyCode::Char('t')),
            Action::ToggleHistory => plain(KeyCode::Char('h')),
            Action::ClearHistory => self
                .variant
                .can_clear_history()
                .then(|| KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL)),
            Action::Memory(op) if self.variant.has_memory() => plain(KeyCode::Char(match op {
                MemoryOp::Add => 'm',
                MemoryOp::Subtract => 'n',
                MemoryOp::Recall => 'r',
                MemoryOp::Clear => 'z',
            })),
            Action::Memory(_) => None,
        }
    }
}
