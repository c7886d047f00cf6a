//! Terminal application state

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::input::{InputHandler, KeyAction};
use super::keypad::Keypad;
use super::ui;
use crate::session::{Action, Session, Variant};

/// Calculator application state
///
/// Wraps a [`Session`] with the pieces only a terminal front end needs:
/// the key map, the on-screen keypad and the quit flag.
#[derive(Debug)]
pub struct CalculatorApp {
    session: Session,
    input: InputHandler,
    keypad: Keypad,
    last_action: Option<Action>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl CalculatorApp {
    /// Creates an app with a fresh session of `variant`
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self::from_session(Session::new(variant))
    }

    /// Creates an app around an existing session
    #[must_use]
    pub fn from_session(session: Session) -> Self {
        let variant = session.variant();
        Self {
            session,
            input: InputHandler::new(variant),
            keypad: Keypad::new(variant),
            last_action: None,
            should_quit: false,
        }
    }

    /// The calculator session
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// The on-screen keypad
    #[must_use]
    pub const fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The key map in use
    #[must_use]
    pub const fn input_handler(&self) -> &InputHandler {
        &self.input
    }

    /// Most recent action, typed or clicked
    #[must_use]
    pub const fn last_action(&self) -> Option<Action> {
        self.last_action
    }

    /// Returns whether the app should quit
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Applies an action and lights up its button
    pub fn press(&mut self, action: Action) {
        self.keypad.highlight(action);
        self.session.apply(action);
        self.last_action = Some(action);
    }

    /// Handles a key press
    pub fn handle_key(&mut self, event: KeyEvent) {
        // Some terminals also report releases
        if event.kind == KeyEventKind::Release {
            return;
        }
        match self.input.handle_key(event) {
            KeyAction::Press(action) => self.press(action),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }

    /// Handles a mouse event; `screen` is the full terminal area
    ///
    /// Returns the action of the clicked button, if any.
    pub fn handle_mouse(&mut self, event: MouseEvent, screen: Rect) -> Option<Action> {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let area = ui::keypad_rect(self, screen);
        let action = self
            .keypad
            .hit_test(area, event.column, event.row)?
            .action;
        self.press(action);
        Some(action)
    }

    /// Dispatches any terminal event
    pub fn handle_event(&mut self, event: &Event, screen: Rect) {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Mouse(mouse) => {
                self.handle_mouse(*mouse, screen);
            }
            _ => {}
        }
    }
}
