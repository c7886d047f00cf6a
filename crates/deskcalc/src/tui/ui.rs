//! Rendering
//!
//! ```text
//! ┌ Calculator ─────────────────────────────────────┐
//! │                  [Hide History] [🌙]             │
//! │ ┌─────────────────────────────────────────────┐ │
//! │ │                                        12+3 │ │
//! │ └─────────────────────────────────────────────┘ │
//! │ ┌ keypad ─────────────────┐┌ History ─────────┐ │
//! │ │ ...                     ││ 2+2 = 4          │ │
//! │ └─────────────────────────┘└──────────────────┘ │
//! │     ⏎ = · Esc C · t theme · h history · ^Q quit  │
//! └─────────────────────────────────────────────────┘
//! ```

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::session::Session;
use crate::theme::Palette;

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Where the keypad is drawn for a given screen size
#[must_use]
pub fn keypad_rect(app: &CalculatorApp, screen: Rect) -> Rect {
    Regions::compute(app.session(), screen).keypad
}

/// Screen regions for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Regions {
    controls: Rect,
    display: Rect,
    keypad: Rect,
    history: Option<Rect>,
    help: Rect,
}

impl Regions {
    fn compute(session: &Session, screen: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // toggles
                Constraint::Length(3), // display
                Constraint::Min(6),    // keypad + history
                Constraint::Length(1), // key help
            ])
            .split(screen);

        let (keypad, history) = if session.history_visible() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(rows[2]);
            (cols[0], Some(cols[1]))
        } else {
            (rows[2], None)
        };

        Self {
            controls: rows[0],
            display: rows[1],
            keypad,
            history,
            help: rows[3],
        }
    }
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
    palette: Palette,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self {
            app,
            palette: app.session().palette(),
        }
    }

    fn base(&self) -> Style {
        Style::default()
            .bg(self.palette.background.into())
            .fg(self.palette.display_fg.into())
    }

    fn special(&self) -> Style {
        Style::default()
            .bg(self.palette.special.bg.into())
            .fg(self.palette.special.fg.into())
    }

    fn render_controls(&self, area: Rect, buf: &mut Buffer) {
        let session = self.app.session();
        let mut spans = Vec::new();
        if session.variant().can_clear_history() {
            spans.push(Span::styled("[Clear Hist]", self.special()));
            spans.push(Span::raw(" "));
        }
        let history_label = if session.history_visible() {
            "[Hide History]"
        } else {
            "[Show History]"
        };
        spans.push(Span::styled(history_label, self.special()));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{}]", session.theme().toggle_glyph()),
            self.special(),
        ));

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Right)
            .style(self.base())
            .render(area, buf);
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .bg(self.palette.display_bg.into())
            .fg(self.palette.display_fg.into());
        let block = Block::default().borders(Borders::ALL).style(style);
        let width = usize::from(block.inner(area).width);

        Paragraph::new(Span::styled(
            tail(self.app.session().display(), width),
            style.add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right)
        .block(block)
        .render(area, buf);
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .bg(self.palette.history_list_bg.into())
            .fg(self.palette.history_fg.into());
        let lines = self.app.session().history_lines();
        let items: Vec<ListItem> = if lines.is_empty() {
            vec![ListItem::new(Span::styled(
                "No calculations yet",
                style.add_modifier(Modifier::ITALIC),
            ))]
        } else {
            lines.into_iter().map(ListItem::new).collect()
        };

        List::new(items)
            .style(style)
            .block(
                Block::default()
                    .title(" History ")
                    .borders(Borders::ALL)
                    .style(
                        Style::default()
                            .bg(self.palette.history_bg.into())
                            .fg(self.palette.history_fg.into()),
                    ),
            )
            .render(area, buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let variant = self.app.session().variant();
        let mut text = String::from("⏎ = · Esc C · t theme · h history");
        if variant.has_memory() {
            text.push_str(" · m/n/r/z M+/M-/MR/MC");
        }
        if variant.can_clear_history() {
            text.push_str(" · ^L clear");
        }
        text.push_str(" · ^Q quit");

        Paragraph::new(Span::styled(
            text,
            self.base().add_modifier(Modifier::DIM),
        ))
        .alignment(Alignment::Center)
        .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.app.session();
        Block::default()
            .title(format!(" {} ", session.variant().title()))
            .borders(Borders::ALL)
            .style(self.base())
            .render(area, buf);

        let regions = Regions::compute(session, area);
        self.render_controls(regions.controls, buf);
        self.render_display(regions.display, buf);
        KeypadWidget::new(self.app.keypad(), self.palette).render(regions.keypad, buf);
        if let Some(history) = regions.history {
            self.render_history(history, buf);
        }
        self.render_help(regions.help, buf);
    }
}

/// Last `width` characters of `text`, so the newest input stays visible
fn tail(text: &str, width: usize) -> &str {
    let count = text.chars().count();
    if count <= width {
        return text;
    }
    let skip = count - width;
    text.char_indices()
        .nth(skip)
        .map_or("", |(start, _)| &text[start..])
}
