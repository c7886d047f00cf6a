//! Calculator session state machine
//!
//! A [`Session`] owns everything one calculator window shows: the input
//! buffer, the history, the memory register (extended variant only) and the
//! two presentation toggles. Every transition is a plain method, so the whole
//! behavior can be exercised without a terminal.
//!
//! Buffer states:
//!
//! ```text
//!   Zero ──digit/op──▶ Composing ──digit/op/⌫──▶ Composing
//!     ▲                    │
//!     └──────clear─────────┤
//!                          ├── "=" ok ──▶ Composing (holds result)
//!                          └── "=" err / bad memory op ──▶ Error
//!   Error ──clear/⌫──▶ Zero     Error ──digit──▶ Composing
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::evaluator::Evaluator;
use crate::core::format::{format_memory, format_result};
use crate::core::history::History;
use crate::core::memory::MemoryRegister;
use crate::core::parser::normalize;
use crate::core::{CalcError, CalcResult, Operation};
use crate::theme::{Palette, Theme};

// ============================================================================
// Buffer
// ============================================================================

/// The text on the calculator display
///
/// Never empty. Holds either characters from `[0-9+\-*/.]` or exactly the
/// sentinel `"Error"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Buffer(String);

impl Buffer {
    /// Text of a freshly cleared buffer
    pub const ZERO: &'static str = "0";
    /// Sentinel shown after any failure
    pub const ERROR: &'static str = "Error";

    /// Creates a buffer holding `"0"`
    #[must_use]
    pub fn zero() -> Self {
        Self(Self::ZERO.to_string())
    }

    /// Creates a buffer holding the error sentinel
    #[must_use]
    pub fn error() -> Self {
        Self(Self::ERROR.to_string())
    }

    /// Wraps `text` if it satisfies the buffer invariant
    #[must_use]
    pub fn try_new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::is_valid(&text).then_some(Self(text))
    }

    /// Returns true if `text` could be held by a buffer
    #[must_use]
    pub fn is_valid(text: &str) -> bool {
        text == Self::ERROR
            || (!text.is_empty() && text.chars().all(Self::is_buffer_char))
    }

    const fn is_buffer_char(ch: char) -> bool {
        matches!(ch, '0'..='9' | '+' | '-' | '*' | '/' | '.')
    }

    /// Current text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the buffer holds the error sentinel
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.0 == Self::ERROR
    }

    /// Returns true if the buffer holds exactly `"0"`
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == Self::ZERO
    }

    /// Replaces `"0"` and `"Error"`, appends otherwise
    fn enter(&mut self, ch: char) {
        if self.is_zero() || self.is_error() {
            self.0.clear();
        }
        self.0.push(ch);
    }

    fn push(&mut self, ch: char) {
        self.0.push(ch);
    }

    fn pop(&mut self) {
        self.0.pop();
        if self.0.is_empty() {
            self.reset();
        }
    }

    fn reset(&mut self) {
        self.0.clear();
        self.0.push_str(Self::ZERO);
    }

    fn set_error(&mut self) {
        self.0.clear();
        self.0.push_str(Self::ERROR);
    }

    /// Shows a formatted number, falling back to the sentinel if the text
    /// would break the invariant
    fn show(&mut self, text: String) {
        *self = Self::try_new(text).unwrap_or_else(Self::error);
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Buffer {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Coarse projection of the buffer used by the state diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    /// Buffer is `"0"`
    Zero,
    /// Buffer holds an expression or a result
    Composing,
    /// Buffer holds `"Error"`
    Error,
}

// ============================================================================
// Variant
// ============================================================================

/// Which calculator is being run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Keypad, history and theme toggle
    #[default]
    Basic,
    /// Adds the memory keys, timestamped history and a clear-history button
    Extended,
}

impl Variant {
    /// All variants
    pub const ALL: [Self; 2] = [Self::Basic, Self::Extended];

    /// Returns true if the memory register and its keys exist
    #[must_use]
    pub const fn has_memory(&self) -> bool {
        matches!(self, Self::Extended)
    }

    /// Returns true if history lines carry an `HH:MM:SS` prefix
    #[must_use]
    pub const fn timestamped_history(&self) -> bool {
        matches!(self, Self::Extended)
    }

    /// Returns true if the history panel can be cleared
    #[must_use]
    pub const fn can_clear_history(&self) -> bool {
        matches!(self, Self::Extended)
    }

    /// Window title
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Basic => "Calculator",
            Self::Extended => "Ultimate Calculator",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => write!(f, "basic"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "extended" | "ultimate" => Ok(Self::Extended),
            _ => Err(format!("Unknown variant: {s}")),
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Memory register keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryOp {
    /// M+
    Add,
    /// M-
    Subtract,
    /// MR
    Recall,
    /// MC
    Clear,
}

impl MemoryOp {
    /// All memory keys in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Recall, Self::Clear];

    /// Key label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Add => "M+",
            Self::Subtract => "M-",
            Self::Recall => "MR",
            Self::Clear => "MC",
        }
    }
}

/// Everything a user can do to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// A digit key, `0..=9`
    Digit(u8),
    /// The decimal point
    Dot,
    /// An operator key
    Operator(Operation),
    /// C
    Clear,
    /// ⌫
    Backspace,
    /// =
    Equals,
    /// M+, M-, MR, MC
    Memory(MemoryOp),
    /// Light/dark switch
    ToggleTheme,
    /// Show/hide the history panel
    ToggleHistory,
    /// Empty the history
    ClearHistory,
}

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Action {
    /// Digit action, if `digit` is a single decimal digit
    #[must_use]
    pub const fn digit(digit: u8) -> Option<Self> {
        if digit <= 9 {
            Some(Self::Digit(digit))
        } else {
            None
        }
    }

    /// Key label as printed on the keypad
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Digit(d) => DIGIT_LABELS.get(usize::from(*d)).copied().unwrap_or("?"),
            Self::Dot => ".",
            Self::Operator(Operation::Add) => "+",
            Self::Operator(Operation::Subtract) => "-",
            Self::Operator(Operation::Multiply) => "*",
            Self::Operator(Operation::Divide) => "/",
            Self::Clear => "C",
            Self::Backspace => "⌫",
            Self::Equals => "=",
            Self::Memory(op) => op.label(),
            Self::ToggleTheme => "Theme",
            Self::ToggleHistory => "History",
            Self::ClearHistory => "Clear Hist",
        }
    }

    /// Returns true for the memory keys
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(d) = ch.to_digit(10).and_then(|d| u8::try_from(d).ok()) {
                return Ok(Self::Digit(d));
            }
            if let Some(op) = Operation::from_char(ch) {
                return Ok(Self::Operator(op));
            }
        }

        match s.to_lowercase().as_str() {
            "." => Ok(Self::Dot),
            "=" => Ok(Self::Equals),
            "c" => Ok(Self::Clear),
            "⌫" | "bs" | "backspace" => Ok(Self::Backspace),
            "m+" => Ok(Self::Memory(MemoryOp::Add)),
            "m-" => Ok(Self::Memory(MemoryOp::Subtract)),
            "mr" => Ok(Self::Memory(MemoryOp::Recall)),
            "mc" => Ok(Self::Memory(MemoryOp::Clear)),
            "theme" => Ok(Self::ToggleTheme),
            "history" => Ok(Self::ToggleHistory),
            "clear hist" | "clear-history" => Ok(Self::ClearHistory),
            _ => Err(format!("Unknown button: {s}")),
        }
    }
}

// ============================================================================
// Session
// ============================================================================

/// One calculator's complete state
#[derive(Debug)]
pub struct Session {
    variant: Variant,
    buffer: Buffer,
    history: History,
    memory: Option<MemoryRegister>,
    theme: Theme,
    history_visible: bool,
    evaluator: Evaluator,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl Session {
    /// Creates a session in its start-up state: `"0"`, light theme,
    /// history panel shown
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            buffer: Buffer::zero(),
            history: History::new(),
            memory: variant.has_memory().then(MemoryRegister::new),
            theme: Theme::Light,
            history_visible: true,
            evaluator: Evaluator::new(),
        }
    }

    /// Sets the starting theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets whether the history panel starts visible
    #[must_use]
    pub fn with_history_visible(mut self, visible: bool) -> Self {
        self.history_visible = visible;
        self
    }

    // ===== Queries =====

    /// Variant this session was created with
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Display text
    #[must_use]
    pub fn display(&self) -> &str {
        self.buffer.as_str()
    }

    /// The input buffer
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// State-diagram projection of the buffer
    #[must_use]
    pub fn state(&self) -> InputState {
        if self.buffer.is_error() {
            InputState::Error
        } else if self.buffer.is_zero() {
            InputState::Zero
        } else {
            InputState::Composing
        }
    }

    /// Calculation history
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// History lines as the panel shows them, newest first
    #[must_use]
    pub fn history_lines(&self) -> Vec<String> {
        self.history.lines(self.variant.timestamped_history())
    }

    /// Memory register value, `None` in the basic variant
    #[must_use]
    pub fn memory_value(&self) -> Option<f64> {
        self.memory.map(|m| m.value())
    }

    /// Current theme
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Colours for the current variant and theme
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::for_theme(self.variant, self.theme)
    }

    /// Whether the history panel is shown
    #[must_use]
    pub const fn history_visible(&self) -> bool {
        self.history_visible
    }

    // ===== Buffer transitions =====

    /// Enters a digit; ignored unless `digit` is `0..=9`
    pub fn append_digit(&mut self, digit: u8) {
        match char::from_digit(u32::from(digit), 10) {
            Some(ch) => self.buffer.enter(ch),
            None => debug!(digit, "ignoring out-of-range digit"),
        }
    }

    /// Enters a decimal point
    ///
    /// A second point in the same literal is accepted here and rejected
    /// when the expression is evaluated.
    pub fn append_dot(&mut self) {
        self.buffer.enter('.');
    }

    /// Appends an operator; after an error the buffer restarts as `"0"` + op
    pub fn append_operator(&mut self, op: Operation) {
        if self.buffer.is_error() {
            self.buffer.reset();
        }
        self.buffer.push(op.symbol());
    }

    /// Deletes the last character
    pub fn backspace(&mut self) {
        if self.buffer.is_error() {
            self.buffer.reset();
        } else {
            self.buffer.pop();
        }
    }

    /// Resets the buffer to `"0"`
    pub fn clear(&mut self) {
        self.buffer.reset();
    }

    /// Evaluates the buffer
    ///
    /// On success the formatted result replaces the buffer and one history
    /// entry is recorded. On failure the buffer shows `"Error"` and the
    /// history is untouched.
    pub fn evaluate(&mut self) -> CalcResult<f64> {
        let expression = normalize(self.buffer.as_str());
        match self.evaluator.evaluate_str(&expression) {
            Ok(value) => {
                let text = format_result(value);
                trace!(%expression, result = %text, "evaluated");
                self.history.record(&expression, &text);
                self.buffer.show(text);
                Ok(value)
            }
            Err(err) => {
                debug!(%expression, kind = err.kind(), error = %err, "evaluation failed");
                self.buffer.set_error();
                Err(err)
            }
        }
    }

    /// Runs a memory key against the buffer's numeric value
    ///
    /// Every key, recall and clear included, requires the buffer to hold a
    /// plain number. No-op in the basic variant.
    pub fn memory(&mut self, op: MemoryOp) -> CalcResult<()> {
        let Some(register) = self.memory.as_mut() else {
            trace!(key = op.label(), "memory keys are not available");
            return Ok(());
        };

        let outcome = match self.buffer.as_str().trim().parse::<f64>() {
            Ok(operand) => match op {
                MemoryOp::Add => register.add(operand).map(drop),
                MemoryOp::Subtract => register.subtract(operand).map(drop),
                MemoryOp::Recall => {
                    let text = format_memory(register.recall());
                    self.buffer.show(text);
                    Ok(())
                }
                MemoryOp::Clear => {
                    register.clear();
                    Ok(())
                }
            },
            Err(_) => Err(CalcError::InvalidOperand(self.buffer.as_str().to_string())),
        };

        match outcome {
            Ok(()) => {
                debug!(key = op.label(), memory = register.value(), "memory updated");
                Ok(())
            }
            Err(err) => {
                debug!(key = op.label(), kind = err.kind(), error = %err, "memory key failed");
                self.buffer.set_error();
                Err(err)
            }
        }
    }

    // ===== Presentation toggles =====

    /// Switches between light and dark
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        trace!(theme = %self.theme, "theme toggled");
    }

    /// Shows or hides the history panel
    pub fn toggle_history(&mut self) {
        self.history_visible = !self.history_visible;
        trace!(visible = self.history_visible, "history panel toggled");
    }

    /// Empties the history; no-op in the basic variant
    pub fn clear_history(&mut self) {
        if self.variant.can_clear_history() {
            self.history.clear();
        }
    }

    // ===== Dispatch =====

    /// Applies one action
    ///
    /// Failures are absorbed: they have already put `"Error"` on the
    /// display and there is nothing else to report.
    pub fn apply(&mut self, action: Action) {
        trace!(%action, buffer = %self.buffer, "apply");
        let result = match action {
            Action::Digit(d) => {
                self.append_digit(d);
                Ok(())
            }
            Action::Dot => {
                self.append_dot();
                Ok(())
            }
            Action::Operator(op) => {
                self.append_operator(op);
                Ok(())
            }
            Action::Clear => {
                self.clear();
                Ok(())
            }
            Action::Backspace => {
                self.backspace();
                Ok(())
            }
            Action::Equals => self.evaluate().map(drop),
            Action::Memory(op) => self.memory(op),
            Action::ToggleTheme => {
                self.toggle_theme();
                Ok(())
            }
            Action::ToggleHistory => {
                self.toggle_history();
                Ok(())
            }
            Action::ClearHistory => {
                self.clear_history();
                Ok(())
            }
        };

        if let Err(err) = result {
            trace!(kind = err.kind(), "action absorbed an error");
        }
    }

    /// Applies actions in order
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.apply(action);
        }
    }
}
