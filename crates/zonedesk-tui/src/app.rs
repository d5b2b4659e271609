//! Application core: event loop, focus and action dispatch.
//!
//! The app owns the [`Console`]. Keys become actions; actions that
//! touch data are forwarded to the console, and after every change the
//! app pushes fresh snapshots back to the panels as `*Updated` actions.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{Result, eyre};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use zonedesk_core::{
    Backend, Console, ConsoleConfig, ConsoleEvent, Dns, PdnsBackend, ShorturlBackend, Shorturls,
    VerticalState,
};

use crate::action::{Action, CredentialView};
use crate::component::Component;
use crate::event::{Event, Events};
use crate::screen::PanelId;
use crate::screens::credential::CredentialPanel;
use crate::screens::vertical::VerticalScreen;
use crate::theme;
use crate::tui::Tui;
use crate::widgets::hints::hint_line;

/// Throbber frame rate.
const TICK_RATE: Duration = Duration::from_millis(250);

/// Panels stack vertically below this width.
const SIDE_BY_SIDE_MIN_WIDTH: u16 = 110;

pub struct App<D: Backend<Dns> = PdnsBackend, S: Backend<Shorturls> = ShorturlBackend> {
    console: Console<D, S>,
    /// Taken by [`App::run`].
    console_rx: Option<mpsc::UnboundedReceiver<ConsoleEvent>>,
    credential: CredentialPanel,
    dns: VerticalScreen<Dns>,
    shorturls: VerticalScreen<Shorturls>,
    focus: PanelId,
    /// Last mount state reported to the panels.
    mounted: bool,
    running: bool,
    help_visible: bool,
    /// Header text: where the services live.
    endpoint: String,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl<D: Backend<Dns>, S: Backend<Shorturls>> App<D, S> {
    pub fn new(
        console: Console<D, S>,
        console_rx: mpsc::UnboundedReceiver<ConsoleEvent>,
        config: &ConsoleConfig,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let mounted = console.is_mounted();
        let mut app = Self {
            console,
            console_rx: Some(console_rx),
            credential: CredentialPanel::new(),
            dns: VerticalScreen::new(format!("DNS records \u{00B7} {}", config.zone)),
            shorturls: VerticalScreen::new("Short URLs"),
            focus: PanelId::Credential,
            mounted,
            running: true,
            help_visible: false,
            endpoint: config.base_url.to_string(),
            action_tx,
            action_rx,
        };
        app.set_focus(if mounted { PanelId::Dns } else { PanelId::Credential });
        app.sync_credential();
        app.sync_verticals();
        app
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut console_rx = self
            .console_rx
            .take()
            .ok_or_else(|| eyre!("event loop already ran"))?;

        let mut tui = Tui::enter()?;
        let mut events = Events::new(TICK_RATE);
        self.drain()?;
        tui.draw(|frame| self.render(frame))?;

        info!("event loop started");

        while self.running {
            tokio::select! {
                event = events.next() => {
                    let Some(event) = event else { break };
                    self.handle_event(event)?;
                }
                Some(event) = console_rx.recv() => {
                    self.console.apply(event);
                    self.sync_verticals();
                }
            }

            self.drain()?;
            tui.draw(|frame| self.render(frame))?;
        }

        info!("event loop ended");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        let action = match event {
            Event::Key(key) => self.handle_key_event(key)?,
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            Event::Tick => Some(Action::Tick),
        };
        if let Some(action) = action {
            self.action_tx.send(action)?;
        }
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────────

    fn focused_mut(&mut self) -> &mut dyn Component {
        match self.focus {
            PanelId::Credential => &mut self.credential,
            PanelId::Dns => &mut self.dns,
            PanelId::Shorturls => &mut self.shorturls,
        }
    }

    fn focused(&self) -> &dyn Component {
        match self.focus {
            PanelId::Credential => &self.credential,
            PanelId::Dns => &self.dns,
            PanelId::Shorturls => &self.shorturls,
        }
    }

    /// Global keys first, then the focused panel. A panel taking text
    /// only lets Ctrl+C and Tab through.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        match key.code {
            KeyCode::Tab => return Ok(Some(Action::FocusNext)),
            KeyCode::BackTab => return Ok(Some(Action::FocusPrev)),
            _ => {}
        }

        if !self.focused().captures_text() && key.modifiers == KeyModifiers::NONE {
            match key.code {
                KeyCode::Char('q') => return Ok(Some(Action::Quit)),
                KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
                KeyCode::Char(c @ '1'..='3') => {
                    let panel = c.to_digit(10).and_then(|n| u8::try_from(n).ok());
                    if let Some(panel) = panel.and_then(PanelId::from_number) {
                        return Ok(Some(Action::FocusPanel(panel)));
                    }
                }
                _ => {}
            }
        }

        self.focused_mut().handle_key_event(key)
    }

    // ── Actions ──────────────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::Resize(w, h) => debug!(width = w, height = h, "terminal resized"),
            Action::FocusNext => self.set_focus(self.focus.next()),
            Action::FocusPrev => self.set_focus(self.focus.prev()),
            Action::FocusPanel(panel) => self.set_focus(*panel),
            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Credential(session_action) => {
                self.console.update_session(session_action.clone());
                self.sync_credential();
                if self.console.is_mounted() != self.mounted {
                    self.mounted = self.console.is_mounted();
                    self.action_tx.send(Action::MountChanged(self.mounted))?;
                }
                self.sync_verticals();
            }
            Action::MountChanged(mounted) => {
                if *mounted {
                    info!("API key saved, verticals mounted");
                } else {
                    info!("API key cleared, verticals unmounted");
                    self.set_focus(PanelId::Credential);
                }
            }

            Action::Dns(vertical_action) => {
                self.console.dispatch_dns(vertical_action.clone());
                self.sync_verticals();
            }
            Action::Shorturls(vertical_action) => {
                self.console.dispatch_shorturls(vertical_action.clone());
                self.sync_verticals();
            }

            _ => {}
        }

        for component in [
            &mut self.credential as &mut dyn Component,
            &mut self.dns,
            &mut self.shorturls,
        ] {
            if let Some(follow_up) = component.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    /// Process everything queued, including follow-ups queued meanwhile.
    fn drain(&mut self) -> Result<()> {
        while let Ok(action) = self.action_rx.try_recv() {
            self.process_action(&action)?;
        }
        Ok(())
    }

    /// Verticals can only take focus while mounted.
    fn set_focus(&mut self, panel: PanelId) {
        let panel = if self.console.is_mounted() {
            panel
        } else {
            PanelId::Credential
        };
        self.focused_mut().set_focused(false);
        self.focus = panel;
        self.focused_mut().set_focused(true);
    }

    fn sync_credential(&self) {
        let session = self.console.session();
        let view = CredentialView {
            display: session.display(),
            masked: session.is_masked(),
            dirty: session.is_dirty(),
            saved: session.saved_key().is_some(),
        };
        let _ = self.action_tx.send(Action::CredentialUpdated(view));
    }

    /// Snapshot both verticals for the panels. Unmounted verticals show
    /// empty state.
    fn sync_verticals(&self) {
        let dns: VerticalState<Dns> = self.console.dns().cloned().unwrap_or_default();
        let shorturls: VerticalState<Shorturls> =
            self.console.shorturls().cloned().unwrap_or_default();
        let _ = self.action_tx.send(Action::DnsUpdated(Arc::new(dns)));
        let _ = self
            .action_tx
            .send(Action::ShorturlsUpdated(Arc::new(shorturls)));
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [header, credential, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header);
        self.credential.render(frame, credential);

        if self.console.is_mounted() {
            let layout = if body.width >= SIDE_BY_SIDE_MIN_WIDTH {
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            } else {
                Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
            };
            let [left, right] = layout.areas(body);
            self.dns.render(frame, left);
            self.shorturls.render(frame, right);
        } else {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "  Save an API key to load DNS records and short URLs.",
                    theme::hint(),
                ))),
                body,
            );
        }

        frame.render_widget(
            Paragraph::new(hint_line(&[
                ("Tab", "focus"),
                ("1-3", "panel"),
                ("?", "help"),
                ("Ctrl+C", "quit"),
            ])),
            status,
        );

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let state = if self.console.is_mounted() {
            Span::styled("\u{25CF} connected", Style::default().fg(theme::OK))
        } else {
            Span::styled("\u{25CB} no key", theme::hint())
        };
        let tabs: Vec<Span> = PanelId::ALL
            .iter()
            .map(|p| {
                let style = if *p == self.focus {
                    theme::selected()
                } else {
                    theme::hint()
                };
                Span::styled(format!(" {} {p} ", p.number()), style)
            })
            .collect();

        let mut spans = vec![
            Span::styled(" zonedesk ", theme::title()),
            Span::styled(format!("{} ", self.endpoint), Style::default().fg(theme::LINK)),
            state,
            Span::raw("   "),
        ];
        spans.extend(tabs);
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 17u16.min(area.height.saturating_sub(2));
        let x = area.width.saturating_sub(width) / 2;
        let y = area.height.saturating_sub(height) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, help_area);
        let block =
            theme::panel("Keyboard Shortcuts", true).style(Style::default().bg(theme::SURFACE));
        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let entry = |key: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<12}"), theme::hint_key()),
                Span::styled(desc, theme::hint()),
            ])
        };
        let section = |title: &'static str| {
            Line::from(Span::styled(
                format!("  {title}"),
                Style::default().fg(theme::ACTIVE),
            ))
        };

        let lines = vec![
            section("Global"),
            entry("Tab/S-Tab", "Next / previous panel"),
            entry("1-3", "Jump to panel"),
            entry("Ctrl+C", "Quit"),
            section("API key"),
            entry("Enter", "Save key"),
            entry("Ctrl+U", "Show / hide"),
            section("Lists"),
            entry("j/k", "Select row"),
            entry("e", "Edit selected row"),
            entry("i", "Open form"),
            entry("r", "Refresh"),
            section("Forms"),
            entry("Enter", "Save"),
            entry("Ctrl+D", "Delete"),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use secrecy::SecretString;
    use zonedesk_core::{CoreError, Resource, SessionAction, WriteKind, WriteReply};

    use super::*;

    /// Empty collections; every write is accepted.
    #[derive(Debug, Default)]
    struct EmptyBackend;

    impl<R: Resource> Backend<R> for EmptyBackend {
        async fn list(&self, _api_key: &SecretString) -> Result<Vec<R::Item>, CoreError> {
            Ok(Vec::new())
        }

        async fn write(
            &self,
            _api_key: &SecretString,
            _kind: WriteKind,
            _draft: &R::Draft,
        ) -> Result<WriteReply, CoreError> {
            Ok(WriteReply::Accepted)
        }
    }

    type TestApp = App<EmptyBackend, EmptyBackend>;

    fn app() -> TestApp {
        let config = zonedesk_config::Config::default().to_console_config().unwrap();
        let (console, rx) = Console::new(EmptyBackend, EmptyBackend);
        let mut app = App::new(console, rx, &config);
        app.drain().unwrap();
        app
    }

    fn press(app: &mut TestApp, code: KeyCode) {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if let Some(action) = app.handle_key_event(key).unwrap() {
            app.action_tx.send(action).unwrap();
        }
        app.drain().unwrap();
    }

    fn screen_text(app: &TestApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn unmounted_keeps_focus_on_credential() {
        let mut app = app();
        assert_eq!(app.focus, PanelId::Credential);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, PanelId::Credential);

        let text = screen_text(&app);
        assert!(text.contains("Save an API key"));
        assert!(text.contains("no key"));
    }

    #[test]
    fn credential_panel_takes_q_as_text() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.console.session().pending(), "q");
        assert!(screen_text(&app).contains("unsaved"));
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = app();
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(matches!(action, Some(Action::Quit)));
    }

    #[tokio::test]
    async fn saving_a_key_mounts_and_unlocks_focus() {
        let mut app = app();
        app.action_tx
            .send(Action::Credential(SessionAction::Edit("k1".into())))
            .unwrap();
        press(&mut app, KeyCode::Enter);

        assert!(app.mounted);
        assert!(app.console.is_mounted());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, PanelId::Dns);

        // Verticals now own `q` only as a global quit outside forms.
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let text = screen_text(&app);
        assert!(text.contains("DNS records"));
        assert!(text.contains("Short URLs"));
        assert!(text.contains("connected"));
    }

    #[tokio::test]
    async fn clearing_the_key_unmounts_and_returns_focus() {
        let mut app = app();
        app.action_tx
            .send(Action::Credential(SessionAction::Edit("k1".into())))
            .unwrap();
        app.action_tx
            .send(Action::Credential(SessionAction::Save))
            .unwrap();
        app.drain().unwrap();
        assert!(app.mounted);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.focus, PanelId::Credential, "2 is text in the key panel");

        app.action_tx
            .send(Action::FocusPanel(PanelId::Shorturls))
            .unwrap();
        app.drain().unwrap();
        assert_eq!(app.focus, PanelId::Shorturls);

        app.action_tx
            .send(Action::Credential(SessionAction::Edit(String::new())))
            .unwrap();
        app.action_tx
            .send(Action::Credential(SessionAction::Save))
            .unwrap();
        app.drain().unwrap();

        assert!(!app.console.is_mounted());
        assert_eq!(app.focus, PanelId::Credential);
    }

    #[test]
    fn help_overlay_toggles() {
        let mut app = app();
        app.action_tx.send(Action::ToggleHelp).unwrap();
        app.drain().unwrap();
        assert!(screen_text(&app).contains("Keyboard Shortcuts"));

        press(&mut app, KeyCode::Esc);
        assert!(!app.help_visible);
    }
}
