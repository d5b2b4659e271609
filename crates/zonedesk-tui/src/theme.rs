//! Colors by role, and the styles built from them.

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

// ── Roles ─────────────────────────────────────────────────────────────

/// Focused borders, selection, cursor.
pub const ACCENT: Color = Color::Rgb(225, 53, 255);
/// Titles, headers and the field being edited.
pub const ACTIVE: Color = Color::Rgb(128, 255, 234);
pub const LINK: Color = Color::Rgb(255, 106, 193);
/// Work in flight, unsaved input.
pub const PENDING: Color = Color::Rgb(241, 250, 140);
pub const OK: Color = Color::Rgb(80, 250, 123);
pub const FAILED: Color = Color::Rgb(255, 99, 99);

pub const TEXT: Color = Color::Rgb(189, 193, 207);
pub const MUTED: Color = Color::Rgb(98, 114, 164);
pub const SURFACE: Color = Color::Rgb(40, 42, 54);

// ── Styles ────────────────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(ACTIVE).add_modifier(Modifier::BOLD)
}

pub fn border(focused: bool) -> Style {
    Style::default().fg(if focused { ACCENT } else { MUTED })
}

/// Rounded, titled frame around a panel.
pub fn panel(title_text: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {title_text} "), title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border(focused))
}

pub fn header() -> Style {
    Style::default()
        .fg(ACTIVE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn row() -> Style {
    Style::default().fg(TEXT)
}

pub fn selected() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(SURFACE)
        .add_modifier(Modifier::BOLD)
}

pub fn error() -> Style {
    Style::default().fg(FAILED)
}

pub fn hint() -> Style {
    Style::default().fg(MUTED)
}

pub fn hint_key() -> Style {
    Style::default().fg(ACTIVE).add_modifier(Modifier::BOLD)
}
