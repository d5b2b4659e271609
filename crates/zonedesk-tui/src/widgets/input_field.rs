//! Single-line labelled input: `label  [value█]`.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::theme;

/// Block cursor appended to the active field.
pub const CURSOR: char = '\u{2588}';

/// Render one form row. `label_width` keeps the values of a form aligned.
pub fn render_input_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    active: bool,
    label_width: u16,
) {
    if area.height == 0 {
        return;
    }

    let [label_area, value_area] =
        Layout::horizontal([Constraint::Length(label_width), Constraint::Min(1)]).areas(area);

    let label_style = if active {
        Style::default().fg(theme::ACTIVE)
    } else {
        Style::default().fg(theme::TEXT)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label.to_owned(), label_style)),
        label_area,
    );

    let mut spans = vec![Span::styled(
        value.to_owned(),
        Style::default().fg(if active { theme::ACTIVE } else { theme::TEXT }),
    )];
    if active {
        spans.push(Span::styled(
            CURSOR.to_string(),
            Style::default().fg(theme::ACCENT),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), value_area);
}
