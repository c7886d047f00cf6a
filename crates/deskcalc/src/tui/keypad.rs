//! On-screen keypad
//!
//! Buttons can be clicked with the mouse and light up when the matching key
//! is typed. The grid mirrors the desktop layout of each variant, gaps
//! included.
//!
//! Basic (4 × 5):
//! ```text
//! [7] [8] [9] [/] [⌫]
//! [4] [5] [6] [*] [C]
//! [1] [2] [3] [-]
//! [0] [.] [=] [+]
//! ```
//!
//! Extended (5 × 5):
//! ```text
//! [M+] [M-] [MR] [MC] [⌫]
//! [7]  [8]  [9]  [/]  [C]
//! [4]  [5]  [6]  [*]
//! [1]  [2]  [3]  [-]
//! [0]  [.]  [=]  [+]
//! ```

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::Operation;
use crate::session::{Action, MemoryOp, Variant};
use crate::theme::{ButtonRole, Palette};

/// A single keypad button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadButton {
    /// What the button does
    pub action: Action,
    /// Grid row
    pub row: u16,
    /// Grid column
    pub col: u16,
    /// Whether the button is currently highlighted
    pub pressed: bool,
}

impl KeypadButton {
    const fn at(action: Action, row: u16, col: u16) -> Self {
        Self {
            action,
            row,
            col,
            pressed: false,
        }
    }

    /// Text on the button face
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.action.label()
    }

    /// Colour role
    #[must_use]
    pub fn role(&self) -> ButtonRole {
        ButtonRole::from(self.action)
    }
}

const fn digit(d: u8) -> Action {
    Action::Digit(d)
}

const fn operator(op: Operation) -> Action {
    Action::Operator(op)
}

/// Row-major grid, `None` where the desktop layout leaves a gap
const BASIC_GRID: [[Option<Action>; 5]; 4] = [
    [
        Some(digit(7)),
        Some(digit(8)),
        Some(digit(9)),
        Some(operator(Operation::Divide)),
        Some(Action::Backspace),
    ],
    [
        Some(digit(4)),
        Some(digit(5)),
        Some(digit(6)),
        Some(operator(Operation::Multiply)),
        Some(Action::Clear),
    ],
    [
        Some(digit(1)),
        Some(digit(2)),
        Some(digit(3)),
        Some(operator(Operation::Subtract)),
        None,
    ],
    [
        Some(digit(0)),
        Some(Action::Dot),
        Some(Action::Equals),
        Some(operator(Operation::Add)),
        None,
    ],
];

const EXTENDED_GRID: [[Option<Action>; 5]; 5] = [
    [
        Some(Action::Memory(MemoryOp::Add)),
        Some(Action::Memory(MemoryOp::Subtract)),
        Some(Action::Memory(MemoryOp::Recall)),
        Some(Action::Memory(MemoryOp::Clear)),
        Some(Action::Backspace),
    ],
    [
        Some(digit(7)),
        Some(digit(8)),
        Some(digit(9)),
        Some(operator(Operation::Divide)),
        Some(Action::Clear),
    ],
    [
        Some(digit(4)),
        Some(digit(5)),
        Some(digit(6)),
        Some(operator(Operation::Multiply)),
        None,
    ],
    [
        Some(digit(1)),
        Some(digit(2)),
        Some(digit(3)),
        Some(operator(Operation::Subtract)),
        None,
    ],
    [
        Some(digit(0)),
        Some(Action::Dot),
        Some(Action::Equals),
        Some(operator(Operation::Add)),
        None,
    ],
];

/// The keypad of one variant
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: u16,
    cols: u16,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}

impl Keypad {
    /// Creates the keypad for `variant`
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        match variant {
            Variant::Basic => Self::from_grid(&BASIC_GRID),
            Variant::Extended => Self::from_grid(&EXTENDED_GRID),
        }
    }

    fn from_grid<const C: usize>(grid: &[[Option<Action>; C]]) -> Self {
        let mut buttons = Vec::new();
        let mut rows = 0u16;
        for (row, cells) in (0u16..).zip(grid) {
            rows = row + 1;
            for (col, cell) in (0u16..).zip(cells) {
                if let Some(action) = cell {
                    buttons.push(KeypadButton::at(*action, row, col));
                }
            }
        }
        Self {
            buttons,
            rows,
            cols: u16::try_from(C).unwrap_or(u16::MAX),
        }
    }

    /// Number of buttons (gaps excluded)
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    /// Button at a grid cell
    #[must_use]
    pub fn button_at(&self, row: u16, col: u16) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Button performing `action`
    #[must_use]
    pub fn find(&self, action: Action) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.action == action)
    }

    /// All buttons in row-major order
    pub fn buttons(&self) -> impl Iterator<Item = &KeypadButton> {
        self.buttons.iter()
    }

    /// Highlights the button for `action` and releases the others
    ///
    /// Actions without a button (toggles, typed keys with no face) just
    /// release everything.
    pub fn highlight(&mut self, action: Action) {
        for btn in &mut self.buttons {
            btn.pressed = btn.action == action;
        }
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in &mut self.buttons {
            btn.pressed = false;
        }
    }

    /// Currently highlighted button
    #[must_use]
    pub fn pressed(&self) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.pressed)
    }

    /// Maps a click inside the bordered `area` to a button
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<&KeypadButton> {
        let inner = inner_area(area);
        if !inner_contains(inner, x, y) {
            return None;
        }

        let btn_width = inner.width / self.cols.max(1);
        let btn_height = inner.height / self.rows.max(1);
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = (x - inner.x) / btn_width;
        let row = (y - inner.y) / btn_height;
        self.button_at(row, col)
    }
}

fn inner_area(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

const fn inner_contains(inner: Rect, x: u16, y: u16) -> bool {
    x >= inner.x
        && y >= inner.y
        && (x - inner.x) < inner.width
        && (y - inner.y) < inner.height
}

/// Renders a [`Keypad`] with palette colours
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    palette: Palette,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub const fn new(keypad: &'a Keypad, palette: Palette) -> Self {
        Self { keypad, palette }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let background = Style::default().bg(self.palette.background.into());
        Block::default()
            .borders(Borders::ALL)
            .border_style(background.fg(self.palette.special.bg.into()))
            .style(background)
            .render(area, buf);

        let inner = inner_area(area);
        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols || inner.height < rows {
            return;
        }

        let btn_width = inner.width / cols.max(1);
        let btn_height = inner.height / rows.max(1);

        for btn in self.keypad.buttons() {
            let colors = self.palette.button(btn.role());
            let face = if btn.pressed {
                colors.active_bg
            } else {
                colors.bg
            };
            let mut style = Style::default().fg(colors.fg.into()).bg(face.into());
            if btn.pressed {
                style = style.add_modifier(Modifier::BOLD);
            }

            let x = inner.x + btn.col * btn_width;
            let y = inner.y + btn.row * btn_height;
            // Leave a one-cell gutter between buttons when there is room
            let face_width = if btn_width > 3 { btn_width - 1 } else { btn_width };
            buf.set_style(Rect::new(x, y, face_width, btn_height), style);

            let label = btn.label();
            let label_width = u16::try_from(label.chars().count()).unwrap_or(face_width);
            let label_x = x + face_width.saturating_sub(label_width) / 2;
            let label_y = y + btn_height / 2;
            buf.set_span(label_x, label_y, &Span::styled(label, style), face_width);
        }
    }
}
