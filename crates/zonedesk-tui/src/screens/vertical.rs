//! One vertical on screen: the list table above, the edit form below.
//!
//! The screen owns no data. It renders the latest snapshot the app hands
//! it and turns keys into vertical actions.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};
use throbber_widgets_tui::{Throbber, ThrobberState};

use zonedesk_core::{
    Dns, Draft, Resource, Shorturls, SubmitStatus, VerticalAction, VerticalState, WriteKind,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::hints::hint_line;
use crate::widgets::input_field::render_input_field;

const LABEL_WIDTH: u16 = 10;

/// Glue between a core resource and the app's action enum.
pub trait VerticalView: Resource {
    fn wrap(action: VerticalAction<Self>) -> Action;

    /// The snapshot carried by this vertical's `*Updated` action.
    fn snapshot(action: &Action) -> Option<&Arc<VerticalState<Self>>>;
}

impl VerticalView for Dns {
    fn wrap(action: VerticalAction<Self>) -> Action {
        Action::Dns(action)
    }

    fn snapshot(action: &Action) -> Option<&Arc<VerticalState<Self>>> {
        match action {
            Action::DnsUpdated(state) => Some(state),
            _ => None,
        }
    }
}

impl VerticalView for Shorturls {
    fn wrap(action: VerticalAction<Self>) -> Action {
        Action::Shorturls(action)
    }

    fn snapshot(action: &Action) -> Option<&Arc<VerticalState<Self>>> {
        match action {
            Action::ShorturlsUpdated(state) => Some(state),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Form,
}

pub struct VerticalScreen<R: VerticalView> {
    title: String,
    state: Arc<VerticalState<R>>,
    mode: Mode,
    /// Index into the draft's fields.
    field: usize,
    focused: bool,
    throbber_state: ThrobberState,
}

impl<R: VerticalView> VerticalScreen<R> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            state: Arc::new(VerticalState::default()),
            mode: Mode::List,
            field: 0,
            focused: false,
            throbber_state: ThrobberState::default(),
        }
    }

    fn field_name(&self) -> &'static str {
        R::Draft::FIELDS.get(self.field).copied().unwrap_or_default()
    }

    fn field_value(&self) -> String {
        self.state
            .form
            .draft
            .get(self.field_name())
            .unwrap_or_default()
            .to_owned()
    }

    fn change(&self, value: String) -> Option<Action> {
        Some(R::wrap(VerticalAction::FieldChanged {
            field: self.field_name().to_owned(),
            value,
        }))
    }

    /// Step a fixed-choice field forwards or backwards.
    fn cycle(&self, choices: &[&str], forward: bool) -> Option<Action> {
        if choices.is_empty() {
            return None;
        }
        let current = self.field_value();
        let pos = choices.iter().position(|c| *c == current).unwrap_or(0);
        let next = if forward {
            (pos + 1) % choices.len()
        } else {
            (pos + choices.len() - 1) % choices.len()
        };
        self.change(choices[next].to_owned())
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => VerticalAction::SelectNext,
            KeyCode::Char('k') | KeyCode::Up => VerticalAction::SelectPrev,
            KeyCode::Char('r') => VerticalAction::FetchStarted,
            KeyCode::Char('e') => {
                self.enter_form();
                VerticalAction::EditSelected
            }
            KeyCode::Char('i' | 'n') | KeyCode::Enter => {
                self.enter_form();
                return None;
            }
            _ => return None,
        };
        Some(R::wrap(action))
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let fields = R::Draft::FIELDS.len();
        let choices = R::Draft::choices(self.field_name());

        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::List;
                None
            }
            KeyCode::Up => {
                self.field = (self.field + fields - 1) % fields;
                None
            }
            KeyCode::Down => {
                self.field = (self.field + 1) % fields;
                None
            }
            KeyCode::Enter => Some(R::wrap(VerticalAction::Submit(WriteKind::Save))),
            KeyCode::Char('d') if ctrl => Some(R::wrap(VerticalAction::Submit(WriteKind::Delete))),
            KeyCode::Left => choices.and_then(|c| self.cycle(c, false)),
            KeyCode::Right => choices.and_then(|c| self.cycle(c, true)),
            KeyCode::Char(_) if ctrl || choices.is_some() => None,
            KeyCode::Char(c) => {
                let mut value = self.field_value();
                value.push(c);
                self.change(value)
            }
            KeyCode::Backspace if choices.is_none() => {
                let mut value = self.field_value();
                value.pop()?;
                self.change(value)
            }
            _ => None,
        }
    }

    fn enter_form(&mut self) {
        self.mode = Mode::Form;
        self.field = 0;
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let list = &self.state.list;
        if list.loading {
            let throbber = Throbber::default()
                .label(" Loading...")
                .style(Style::default().fg(theme::ACTIVE))
                .throbber_style(Style::default().fg(theme::ACCENT));
            frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
            return;
        }
        let line = match &list.error {
            Some(err) => Line::from(Span::styled(format!(" {err}"), theme::error())),
            None => Line::from(Span::styled(
                format!(" {} entries", list.items.len()),
                theme::hint(),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let header = Row::new(R::COLUMNS.iter().map(|c| Cell::from(*c))).style(theme::header());
        let rows: Vec<Row> = self
            .state
            .list
            .items
            .iter()
            .map(|item| Row::new(R::row(item)).style(theme::row()))
            .collect();
        let widths = R::COLUMNS.iter().map(|_| Constraint::Fill(1));

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(theme::selected());

        let mut state = TableState::default();
        if !self.state.list.items.is_empty() {
            state.select(Some(self.state.list.selected));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let fields = R::Draft::FIELDS;
        let mut constraints = vec![Constraint::Length(1); fields.len()];
        constraints.push(Constraint::Length(1));
        let rows = Layout::vertical(constraints).split(area);

        let editing = self.focused && self.mode == Mode::Form;
        for (i, name) in fields.iter().enumerate() {
            let value = self.state.form.draft.get(name).unwrap_or_default();
            let shown = match R::Draft::choices(name) {
                Some(_) if editing && i == self.field => format!("\u{2039} {value} \u{203A}"),
                _ => value.to_owned(),
            };
            render_input_field(
                frame,
                rows[i],
                &format!(" {}", field_label(name)),
                &shown,
                editing && i == self.field,
                LABEL_WIDTH,
            );
        }

        let form = &self.state.form;
        let status = match &form.status {
            SubmitStatus::Idle => Line::default(),
            SubmitStatus::Sending { kind } => {
                let verb = match kind {
                    WriteKind::Save => " Saving...",
                    WriteKind::Delete => " Deleting...",
                };
                Line::from(Span::styled(verb, Style::default().fg(theme::PENDING)))
            }
            SubmitStatus::Failed { .. } => Line::from(Span::styled(
                format!(" {}", form.error_text().unwrap_or_default()),
                theme::error(),
            )),
        };
        frame.render_widget(Paragraph::new(status), rows[fields.len()]);
    }
}

/// `ttl` -> `TTL`, `name` -> `Name`.
fn field_label(name: &str) -> String {
    if name == "ttl" {
        return "TTL".into();
    }
    let mut chars = name.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

impl<R: VerticalView> Component for VerticalScreen<R> {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(match self.mode {
            Mode::List => self.handle_list_key(key),
            Mode::Form => self.handle_form_key(key),
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Some(state) = R::snapshot(action) {
            self.state = Arc::clone(state);
        } else if matches!(action, Action::Tick)
            && (self.state.list.loading || self.state.form.is_sending())
        {
            self.throbber_state.calc_next();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = theme::panel(&self.title, self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let form_height = u16::try_from(R::Draft::FIELDS.len() + 1).unwrap_or(u16::MAX);
        let [status, table, form, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(form_height),
            Constraint::Length(1),
        ])
        .areas(inner);

        self.render_status(frame, status);
        self.render_table(frame, table);
        self.render_form(frame, form);

        let pairs: &[(&str, &str)] = match self.mode {
            Mode::List => &[
                ("j/k", "select"),
                ("e", "edit selected"),
                ("i", "form"),
                ("r", "refresh"),
                ("Tab", "next panel"),
            ],
            Mode::Form => &[
                ("\u{2191}/\u{2193}", "field"),
                ("Enter", "save"),
                ("Ctrl+D", "delete"),
                ("Esc", "list"),
            ],
        };
        frame.render_widget(Paragraph::new(hint_line(pairs)), hints);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn captures_text(&self) -> bool {
        self.mode == Mode::Form
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use zonedesk_core::{DnsDraft, RecordType, ShortLink, ShorturlDraft};

    use super::*;
    use crate::screens::test_support::{contains, render_lines};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn links_screen(state: VerticalState<Shorturls>) -> VerticalScreen<Shorturls> {
        let mut screen = VerticalScreen::<Shorturls>::new("Short URLs");
        screen
            .update(&Action::ShorturlsUpdated(Arc::new(state)))
            .unwrap();
        screen
    }

    fn field_change(action: Option<Action>) -> (String, String) {
        match action {
            Some(
                Action::Shorturls(VerticalAction::FieldChanged { field, value })
                | Action::Dns(VerticalAction::FieldChanged { field, value }),
            ) => (field, value),
            other => panic!("expected a field change, got {other:?}"),
        }
    }

    #[test]
    fn list_keys_select_and_edit() {
        let mut screen = links_screen(VerticalState::default());

        let next = screen.handle_key_event(press(KeyCode::Char('j'))).unwrap();
        assert!(matches!(
            next,
            Some(Action::Shorturls(VerticalAction::SelectNext))
        ));
        assert!(!screen.captures_text());

        let edit = screen.handle_key_event(press(KeyCode::Char('e'))).unwrap();
        assert!(matches!(
            edit,
            Some(Action::Shorturls(VerticalAction::EditSelected))
        ));
        assert!(screen.captures_text());

        screen.handle_key_event(press(KeyCode::Esc)).unwrap();
        assert!(!screen.captures_text());
    }

    #[test]
    fn typing_sends_whole_field_value() {
        let mut state = VerticalState::<Shorturls>::default();
        state.form.draft = ShorturlDraft {
            slug: "a".into(),
            target: "http://x".into(),
        };
        let mut screen = links_screen(state);
        screen.handle_key_event(press(KeyCode::Enter)).unwrap();

        let typed = screen.handle_key_event(press(KeyCode::Char('b'))).unwrap();
        assert_eq!(field_change(typed), ("slug".into(), "ab".into()));

        screen.handle_key_event(press(KeyCode::Down)).unwrap();
        let erased = screen.handle_key_event(press(KeyCode::Backspace)).unwrap();
        assert_eq!(field_change(erased), ("target".into(), "http://".into()));

        // `q` is text while the form is open.
        let q = screen.handle_key_event(press(KeyCode::Char('q'))).unwrap();
        assert_eq!(field_change(q).1, "http://xq");
    }

    #[test]
    fn form_submit_and_delete() {
        let mut screen = links_screen(VerticalState::default());
        screen.handle_key_event(press(KeyCode::Char('i'))).unwrap();

        let save = screen.handle_key_event(press(KeyCode::Enter)).unwrap();
        assert!(matches!(
            save,
            Some(Action::Shorturls(VerticalAction::Submit(WriteKind::Save)))
        ));

        let delete = screen
            .handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(matches!(
            delete,
            Some(Action::Shorturls(VerticalAction::Submit(WriteKind::Delete)))
        ));
    }

    #[test]
    fn record_type_cycles_through_choices() {
        let mut screen = VerticalScreen::<Dns>::new("DNS");
        let mut state = VerticalState::<Dns>::default();
        state.form.draft = DnsDraft {
            rtype: RecordType::Txt,
            ..DnsDraft::default()
        };
        screen.update(&Action::DnsUpdated(Arc::new(state))).unwrap();

        screen.handle_key_event(press(KeyCode::Char('i'))).unwrap();
        screen.handle_key_event(press(KeyCode::Down)).unwrap();

        let right = screen.handle_key_event(press(KeyCode::Right)).unwrap();
        assert_eq!(field_change(right), ("type".into(), "A".into()));
        let left = screen.handle_key_event(press(KeyCode::Left)).unwrap();
        assert_eq!(field_change(left), ("type".into(), "CNAME".into()));

        // Free text is not accepted on a choice field.
        let typed = screen.handle_key_event(press(KeyCode::Char('x'))).unwrap();
        assert!(typed.is_none());
    }

    #[test]
    fn renders_rows_and_list_error() {
        let mut state = VerticalState::<Shorturls>::default();
        state.list.items = vec![ShortLink {
            slug: "a".into(),
            target: "http://x".into(),
        }];
        state.list.error = Some("connection refused".into());
        let screen = links_screen(state);

        let lines = render_lines(&screen, 80, 14);
        assert!(contains(&lines, "Short URLs"));
        assert!(contains(&lines, "Slug"));
        assert!(contains(&lines, "http://x"));
        assert!(contains(&lines, "connection refused"));
    }

    #[test]
    fn renders_form_error_text() {
        let mut state = VerticalState::<Shorturls>::default();
        state.form.status = SubmitStatus::Failed {
            status: Some(422),
            message: Some("bad ttl".into()),
        };
        let screen = links_screen(state);

        let lines = render_lines(&screen, 80, 14);
        assert!(contains(&lines, "422: bad ttl"));
        assert!(contains(&lines, "Target"));
    }

    #[test]
    fn labels() {
        assert_eq!(field_label("ttl"), "TTL");
        assert_eq!(field_label("content"), "Content");
        assert_eq!(field_label(""), "");
    }
}
