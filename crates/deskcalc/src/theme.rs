//! Light/dark themes and colour palettes
//!
//! A palette is a pure function of `(Variant, Theme)`: toggling the theme
//! twice always yields identical colours.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::session::{Action, Variant};

/// Colour scheme selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background (start-up default)
    #[default]
    Light,
    /// Dark background
    Dark,
}

impl Theme {
    /// The other theme
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Returns true for [`Theme::Dark`]
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Glyph on the theme switch: the moon offers dark, the sun offers light
    #[must_use]
    pub const fn toggle_glyph(self) -> &'static str {
        match self {
            Self::Light => "🌙",
            Self::Dark => "☀",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(format!("Unknown theme: {s}")),
        }
    }
}

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Rgb {
    /// Builds a colour from `0xRRGGBB`
    #[must_use]
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// `#rrggbb`
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(feature = "tui")]
impl From<Rgb> for ratatui::style::Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb(rgb.r, rgb.g, rgb.b)
    }
}

/// How a key is coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonRole {
    /// Digits and the decimal point
    Number,
    /// `+ - * /` and `=`
    Operator,
    /// C, ⌫, memory keys and the panel controls
    Special,
}

impl From<Action> for ButtonRole {
    fn from(action: Action) -> Self {
        match action {
            Action::Digit(_) | Action::Dot => Self::Number,
            Action::Operator(_) | Action::Equals => Self::Operator,
            Action::Clear
            | Action::Backspace
            | Action::Memory(_)
            | Action::ToggleTheme
            | Action::ToggleHistory
            | Action::ClearHistory => Self::Special,
        }
    }
}

/// Colours of one key role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    /// Label colour
    pub fg: Rgb,
    /// Face colour
    pub bg: Rgb,
    /// Face colour while pressed
    pub active_bg: Rgb,
}

/// Every colour the calculator draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Window background
    pub background: Rgb,
    /// Display background
    pub display_bg: Rgb,
    /// Display text
    pub display_fg: Rgb,
    /// Digit keys
    pub number: ButtonColors,
    /// Operator keys
    pub operator: ButtonColors,
    /// Special keys
    pub special: ButtonColors,
    /// History panel frame
    pub history_bg: Rgb,
    /// History text
    pub history_fg: Rgb,
    /// History list background
    pub history_list_bg: Rgb,
}

const fn buttons(fg: u32, bg: u32, active_bg: u32) -> ButtonColors {
    ButtonColors {
        fg: Rgb::hex(fg),
        bg: Rgb::hex(bg),
        active_bg: Rgb::hex(active_bg),
    }
}

const BASIC_LIGHT: Palette = Palette {
    background: Rgb::hex(0xf0f0f0),
    display_bg: Rgb::hex(0xffffff),
    display_fg: Rgb::hex(0x000000),
    number: buttons(0x000000, 0xe0e0e0, 0xd0d0d0),
    operator: buttons(0xffffff, 0xff9500, 0xffaa33),
    special: buttons(0x000000, 0xa6a6a6, 0xbfbfbf),
    history_bg: Rgb::hex(0xffffff),
    history_fg: Rgb::hex(0x000000),
    history_list_bg: Rgb::hex(0xf0f0f0),
};

const BASIC_DARK: Palette = Palette {
    background: Rgb::hex(0x2d2d2d),
    display_bg: Rgb::hex(0x3d3d3d),
    display_fg: Rgb::hex(0xffffff),
    number: buttons(0xffffff, 0x4d4d4d, 0x5d5d5d),
    operator: buttons(0xffffff, 0xff9500, 0xffaa33),
    special: buttons(0x000000, 0xa6a6a6, 0xbfbfbf),
    history_bg: Rgb::hex(0x3d3d3d),
    history_fg: Rgb::hex(0xffffff),
    history_list_bg: Rgb::hex(0x3d3d3d),
};

const EXTENDED_LIGHT: Palette = Palette {
    background: Rgb::hex(0xf3f4f6),
    display_bg: Rgb::hex(0xffffff),
    display_fg: Rgb::hex(0x111827),
    number: buttons(0x111827, 0xe5e7eb, 0xd1d5db),
    operator: buttons(0xffffff, 0xff6f61, 0xff8a80),
    special: buttons(0x111827, 0x9ca3af, 0xb9c1cc),
    history_bg: Rgb::hex(0xffffff),
    history_fg: Rgb::hex(0x374151),
    history_list_bg: Rgb::hex(0xf9fafb),
};

const EXTENDED_DARK: Palette = Palette {
    background: Rgb::hex(0x1c2526),
    display_bg: Rgb::hex(0x2e3537),
    display_fg: Rgb::hex(0xe0e6e8),
    number: buttons(0xe0e6e8, 0x3a4345, 0x4e5a5d),
    operator: buttons(0xffffff, 0xff6f61, 0xff8a80),
    special: buttons(0xffffff, 0x6b7280, 0x8b95a1),
    history_bg: Rgb::hex(0x2e3537),
    history_fg: Rgb::hex(0xc4cdd5),
    history_list_bg: Rgb::hex(0x2e3537),
};

impl Palette {
    /// Palette for a variant and theme
    #[must_use]
    pub const fn for_theme(variant: Variant, theme: Theme) -> Self {
        match (variant, theme) {
            (Variant::Basic, Theme::Light) => BASIC_LIGHT,
            (Variant::Basic, Theme::Dark) => BASIC_DARK,
            (Variant::Extended, Theme::Light) => EXTENDED_LIGHT,
            (Variant::Extended, Theme::Dark) => EXTENDED_DARK,
        }
    }

    /// Colours for a key role
    #[must_use]
    pub const fn button(&self, role: ButtonRole) -> ButtonColors {
        match role {
            ButtonRole::Number => self.number,
            ButtonRole::Operator => self.operator,
            ButtonRole::Special => self.special,
        }
    }
}
