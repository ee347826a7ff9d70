//! Dark teal theme tokens for the booking screens
//!
//! # Color Palette
//! - **Background**: Slate near-black (base layer)
//! - **Surface**: Dark gray (cards, focused inputs)
//! - **Accent**: Teal (buttons, focus, progress)
//! - **Positive**: Green (completed loading stages)
//! - **Active**: Blue (loading stage in progress)
//! - **Warning**: Amber (advisory issues, cancelled search)
//! - **Negative**: Red (errors, degraded airport list)
//! - **Muted**: Gray (labels, placeholders, secondary text)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub accent: Color,
    pub positive: Color,
    pub active: Color,
    pub warning: Color,
    pub negative: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_teal()
    }
}

impl Theme {
    pub const fn dark_teal() -> Self {
        Self {
            background: Color::Rgb(17, 24, 39),
            surface: Color::Rgb(31, 41, 55),
            accent: Color::Rgb(20, 184, 166),
            positive: Color::Rgb(34, 197, 94),
            active: Color::Rgb(59, 130, 246),
            warning: Color::Rgb(245, 158, 11),
            negative: Color::Rgb(239, 68, 68),
            muted: Color::Rgb(156, 163, 175),
            text_primary: Color::Rgb(229, 231, 235),
            text_secondary: Color::Rgb(209, 213, 219),
        }
    }

    /// Colour for a carrier badge.
    pub fn airline_color(&self, airline: &str) -> Color {
        match airline {
            "Emirates" => self.negative,
            "Lufthansa" => self.warning,
            _ => self.muted,
        }
    }
}

const THEME: Theme = Theme::dark_teal();

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

pub fn secondary() -> Style {
    Style::default().fg(THEME.text_secondary)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(THEME.positive)
}

pub fn active() -> Style {
    Style::default().fg(THEME.active)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn title() -> Style {
    text().add_modifier(Modifier::BOLD)
}

/// Filled teal button; reversed when focused.
pub fn button(focused: bool) -> Style {
    let base = Style::default().fg(Color::White).bg(THEME.accent);
    if focused {
        base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        base
    }
}

/// Input box style; focused inputs get the surface background.
pub fn input(focused: bool, filled: bool) -> Style {
    let fg = if filled { THEME.text_primary } else { THEME.muted };
    let style = Style::default().fg(fg);
    if focused {
        style.bg(THEME.surface).add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn highlight() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

pub fn airline(airline: &str) -> Style {
    Style::default()
        .fg(THEME.airline_color(airline))
        .add_modifier(Modifier::BOLD)
}

pub fn background() -> Style {
    Style::default().bg(THEME.background)
}
