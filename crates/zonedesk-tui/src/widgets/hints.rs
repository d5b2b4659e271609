//! Key hint line, e.g. "Enter save  Ctrl+U show".

use ratatui::text::{Line, Span};

use crate::theme;

/// Build a hint line from `(key, description)` pairs.
pub fn hint_line(pairs: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(pairs.len() * 2 + 1);
    spans.push(Span::raw(" "));
    for (key, desc) in pairs {
        spans.push(Span::styled(format!("{key} "), theme::hint_key()));
        spans.push(Span::styled(format!("{desc}  "), theme::hint()));
    }
    Line::from(spans)
}
