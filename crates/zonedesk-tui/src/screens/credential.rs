//! API key panel: masked entry, save and show/hide.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect},
    style::Style,
    text::Span,
    widgets::Paragraph,
};

use zonedesk_core::SessionAction;

use crate::action::{Action, CredentialView};
use crate::component::Component;
use crate::theme;
use crate::widgets::hints::hint_line;
use crate::widgets::input_field::render_input_field;

#[derive(Debug, Default)]
pub struct CredentialPanel {
    view: CredentialView,
    focused: bool,
}

impl CredentialPanel {
    pub fn new() -> Self {
        Self::default()
    }

    fn status(&self) -> Span<'static> {
        let v = &self.view;
        if v.dirty {
            Span::styled(
                "unsaved: Enter applies this key",
                Style::default().fg(theme::PENDING),
            )
        } else if v.saved {
            Span::styled("key in effect", Style::default().fg(theme::OK))
        } else {
            Span::styled(
                "enter an API key to load the zone and short URLs",
                theme::hint(),
            )
        }
    }
}

impl Component for CredentialPanel {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('u') if ctrl => SessionAction::ToggleMask,
            KeyCode::Char('w') if ctrl => SessionAction::Edit(String::new()),
            KeyCode::Char(_) if ctrl => return Ok(None),
            KeyCode::Char(c) => SessionAction::Push(c),
            KeyCode::Backspace => SessionAction::Pop,
            KeyCode::Enter => SessionAction::Save,
            _ => return Ok(None),
        };
        Ok(Some(Action::Credential(action)))
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::CredentialUpdated(view) = action {
            self.view = view.clone();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::panel("API Key", self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [input, status, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        render_input_field(frame, input, " Key", &self.view.display, self.focused, 6);
        frame.render_widget(
            Paragraph::new(self.status()),
            status.inner(Margin::new(1, 0)),
        );

        let toggle = if self.view.masked { "show" } else { "hide" };
        frame.render_widget(
            Paragraph::new(hint_line(&[
                ("Enter", "save"),
                ("Ctrl+U", toggle),
                ("Ctrl+W", "clear"),
                ("Tab", "next panel"),
            ])),
            hints,
        );
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn captures_text(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyEventKind;

    use super::*;
    use crate::screens::test_support::{contains, render_lines};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        let mut k = KeyEvent::new(code, modifiers);
        k.kind = KeyEventKind::Press;
        k
    }

    fn session_action(panel: &mut CredentialPanel, k: KeyEvent) -> Option<SessionAction> {
        match panel.handle_key_event(k).unwrap() {
            Some(Action::Credential(a)) => Some(a),
            _ => None,
        }
    }

    #[test]
    fn keys_map_to_session_actions() {
        let mut panel = CredentialPanel::new();
        assert_eq!(
            session_action(&mut panel, key(KeyCode::Char('k'), KeyModifiers::NONE)),
            Some(SessionAction::Push('k'))
        );
        assert_eq!(
            session_action(&mut panel, key(KeyCode::Char('K'), KeyModifiers::SHIFT)),
            Some(SessionAction::Push('K'))
        );
        assert_eq!(
            session_action(&mut panel, key(KeyCode::Enter, KeyModifiers::NONE)),
            Some(SessionAction::Save)
        );
        assert_eq!(
            session_action(&mut panel, key(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(SessionAction::ToggleMask)
        );
        assert_eq!(
            session_action(&mut panel, key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn renders_masked_value_and_status() {
        let mut panel = CredentialPanel::new();
        panel
            .update(&Action::CredentialUpdated(CredentialView {
                display: "\u{2022}".repeat(3),
                masked: true,
                dirty: true,
                saved: false,
            }))
            .unwrap();

        let lines = render_lines(&panel, 70, 5);
        assert!(contains(&lines, "API Key"));
        assert!(contains(&lines, "\u{2022}\u{2022}\u{2022}"));
        assert!(contains(&lines, "unsaved"));
        assert!(contains(&lines, "show"));
    }
}
