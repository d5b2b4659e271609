// ── Console runtime ──
//
// Owns the credential and, once a key is saved, one mounted instance of
// each vertical. Reducer effects run as tokio tasks that report back as
// `ConsoleEvent`s on an unbounded channel; the UI loop drains the channel
// and feeds each event to `Console::apply`. Every mount gets a fresh epoch
// and a child cancellation token, so work started for a torn-down vertical
// is cancelled and anything it still delivers is dropped.
//
// All methods that can start work must be called inside a tokio runtime.

use std::sync::Arc;

use secrecy::SecretString;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::{Backend, PdnsBackend, ShorturlBackend, WriteReply};
use crate::config::ConsoleConfig;
use crate::error::CoreError;
use crate::feed::ChangeFeed;
use crate::resource::{Dns, Resource, Shorturls, VerticalKind};
use crate::session::{Session, SessionAction, SessionEffect};
use crate::state::{reduce, Effect, VerticalAction, VerticalState, WriteKind};

/// Console wired to the real services.
pub type ApiConsole = Console<PdnsBackend, ShorturlBackend>;

/// Result of background work, tagged with the mount it belongs to.
#[derive(Debug, Clone)]
pub enum ConsoleEvent {
    Dns {
        epoch: u64,
        action: VerticalAction<Dns>,
    },
    Shorturls {
        epoch: u64,
        action: VerticalAction<Shorturls>,
    },
}

impl ConsoleEvent {
    pub fn epoch(&self) -> u64 {
        match self {
            Self::Dns { epoch, .. } | Self::Shorturls { epoch, .. } => *epoch,
        }
    }

    pub fn kind(&self) -> VerticalKind {
        match self {
            Self::Dns { .. } => VerticalKind::Dns,
            Self::Shorturls { .. } => VerticalKind::Shorturls,
        }
    }
}

// ── Mounted vertical ────────────────────────────────────────────────

struct Vertical<R: Resource, B: Backend<R>> {
    state: VerticalState<R>,
    backend: Arc<B>,
    api_key: SecretString,
    epoch: u64,
    feed: ChangeFeed,
    cancel: CancellationToken,
    events: mpsc::UnboundedSender<ConsoleEvent>,
}

impl<R: Resource, B: Backend<R>> Vertical<R, B> {
    /// Mount with empty state, subscribe to the change feed and start the
    /// initial fetch.
    fn mount(
        backend: Arc<B>,
        api_key: SecretString,
        epoch: u64,
        events: mpsc::UnboundedSender<ConsoleEvent>,
        cancel: CancellationToken,
    ) -> Self {
        let mut vertical = Self {
            state: VerticalState::default(),
            backend,
            api_key,
            epoch,
            feed: ChangeFeed::new(),
            cancel,
            events,
        };
        vertical.spawn_change_listener();
        vertical.dispatch(VerticalAction::FetchStarted);
        vertical
    }

    fn dispatch(&mut self, action: VerticalAction<R>) {
        if let Some(effect) = reduce(&mut self.state, action) {
            self.run(effect);
        }
    }

    /// Switch credentials and refetch. The form and its draft are kept.
    fn rekey(&mut self, api_key: SecretString) {
        self.api_key = api_key;
        self.dispatch(VerticalAction::FetchStarted);
    }

    fn run(&self, effect: Effect<R>) {
        match effect {
            Effect::Fetch { generation } => self.spawn_fetch(generation),
            Effect::Write {
                submission,
                kind,
                draft,
            } => self.spawn_write(submission, kind, draft),
            Effect::AnnounceChange => {
                debug!(vertical = %R::KIND, "announcing change");
                self.feed.announce();
            }
        }
    }

    fn spawn_change_listener(&self) {
        let mut changes = self.feed.subscribe();
        let cancel = self.cancel.clone();
        let events = self.events.clone();
        let epoch = self.epoch;

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        if events.send(R::event(epoch, VerticalAction::FetchStarted)).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!(vertical = %R::KIND, epoch, "change listener stopped");
        });
    }

    fn spawn_fetch(&self, generation: u64) {
        let backend = Arc::clone(&self.backend);
        let api_key = self.api_key.clone();
        let cancel = self.cancel.clone();
        let events = self.events.clone();
        let epoch = self.epoch;
        debug!(vertical = %R::KIND, generation, "fetching list");

        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                () = cancel.cancelled() => return,
                result = backend.list(&api_key) => result,
            };
            let action = match result {
                Ok(items) => {
                    debug!(vertical = %R::KIND, generation, count = items.len(), "list fetched");
                    VerticalAction::FetchSucceeded { generation, items }
                }
                Err(e) => {
                    warn!(vertical = %R::KIND, error = %e, "list fetch failed");
                    VerticalAction::FetchFailed {
                        generation,
                        message: e.to_string(),
                    }
                }
            };
            let _ = events.send(R::event(epoch, action));
        });
    }

    /// A write already on the wire runs to completion even if the vertical
    /// is torn down; only its report is suppressed.
    fn spawn_write(&self, submission: u64, kind: WriteKind, draft: R::Draft) {
        let backend = Arc::clone(&self.backend);
        let api_key = self.api_key.clone();
        let cancel = self.cancel.clone();
        let events = self.events.clone();
        let epoch = self.epoch;
        debug!(vertical = %R::KIND, submission, %kind, "sending write");

        tokio::spawn(async move {
            let result = backend.write(&api_key, kind, &draft).await;
            if cancel.is_cancelled() {
                return;
            }
            let send = |action| {
                let _ = events.send(R::event(epoch, action));
            };
            match result {
                Ok(WriteReply::Accepted) => send(VerticalAction::SubmitSucceeded { submission }),
                Ok(WriteReply::Rejected { status, message }) => {
                    send(VerticalAction::SubmitFailed { submission, status });
                    let message = tokio::select! {
                        biased;
                        () = cancel.cancelled() => return,
                        message = message => message,
                    };
                    send(VerticalAction::SubmitErrorBody {
                        submission,
                        message,
                    });
                }
                Err(e) => send(VerticalAction::SubmitUnreachable {
                    submission,
                    message: e.to_string(),
                }),
            }
        });
    }
}

impl<R: Resource, B: Backend<R>> Drop for Vertical<R, B> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

struct Mounted<D: Backend<Dns>, S: Backend<Shorturls>> {
    dns: Vertical<Dns, D>,
    shorturls: Vertical<Shorturls, S>,
}

// ── Console ─────────────────────────────────────────────────────────

pub struct Console<D: Backend<Dns>, S: Backend<Shorturls>> {
    session: Session,
    dns_backend: Arc<D>,
    shorturl_backend: Arc<S>,
    mounted: Option<Mounted<D, S>>,
    epoch: u64,
    events: mpsc::UnboundedSender<ConsoleEvent>,
    cancel: CancellationToken,
}

impl ApiConsole {
    /// Build the HTTP backends from `config`. Nothing is fetched until a
    /// key is saved.
    pub fn from_config(
        config: &ConsoleConfig,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ConsoleEvent>), CoreError> {
        let dns = PdnsBackend::from_config(config)?;
        let shorturls = ShorturlBackend::from_config(config)?;
        info!(base_url = %config.base_url, zone = %config.zone, "console configured");
        Ok(Self::new(dns, shorturls))
    }
}

impl<D: Backend<Dns>, S: Backend<Shorturls>> Console<D, S> {
    pub fn new(dns: D, shorturls: S) -> (Self, mpsc::UnboundedReceiver<ConsoleEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let console = Self {
            session: Session::new(),
            dns_backend: Arc::new(dns),
            shorturl_backend: Arc::new(shorturls),
            mounted: None,
            epoch: 0,
            events,
            cancel: CancellationToken::new(),
        };
        (console, rx)
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Current mount generation; bumps on every mount.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn dns(&self) -> Option<&VerticalState<Dns>> {
        self.mounted.as_ref().map(|m| &m.dns.state)
    }

    pub fn shorturls(&self) -> Option<&VerticalState<Shorturls>> {
        self.mounted.as_ref().map(|m| &m.shorturls.state)
    }

    // ── Input ────────────────────────────────────────────────────────

    pub fn update_session(&mut self, action: SessionAction) {
        match self.session.apply(action) {
            Some(SessionEffect::Mount(key)) => self.mount(key),
            Some(SessionEffect::Rekey(key)) => self.rekey(key),
            Some(SessionEffect::Unmount) => self.unmount(),
            None => {}
        }
    }

    /// Type and save `key` in one step.
    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.update_session(SessionAction::Edit(key.into()));
        self.update_session(SessionAction::Save);
    }

    pub fn dispatch_dns(&mut self, action: VerticalAction<Dns>) {
        match self.mounted.as_mut() {
            Some(m) => m.dns.dispatch(action),
            None => debug!("DNS action ignored: not mounted"),
        }
    }

    pub fn dispatch_shorturls(&mut self, action: VerticalAction<Shorturls>) {
        match self.mounted.as_mut() {
            Some(m) => m.shorturls.dispatch(action),
            None => debug!("short-URL action ignored: not mounted"),
        }
    }

    /// Feed a background result back in. Results from an earlier mount are
    /// dropped.
    pub fn apply(&mut self, event: ConsoleEvent) {
        let current = event.epoch() == self.epoch;
        let Some(mounted) = self.mounted.as_mut().filter(|_| current) else {
            debug!(
                vertical = %event.kind(),
                event_epoch = event.epoch(),
                epoch = self.epoch,
                "dropping event for unmounted vertical"
            );
            return;
        };
        match event {
            ConsoleEvent::Dns { action, .. } => mounted.dns.dispatch(action),
            ConsoleEvent::Shorturls { action, .. } => mounted.shorturls.dispatch(action),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    fn mount(&mut self, api_key: SecretString) {
        self.unmount();
        self.epoch += 1;
        let dns = Vertical::mount(
            Arc::clone(&self.dns_backend),
            api_key.clone(),
            self.epoch,
            self.events.clone(),
            self.cancel.child_token(),
        );
        let shorturls = Vertical::mount(
            Arc::clone(&self.shorturl_backend),
            api_key,
            self.epoch,
            self.events.clone(),
            self.cancel.child_token(),
        );
        self.mounted = Some(Mounted { dns, shorturls });
        info!(epoch = self.epoch, "verticals mounted");
    }

    fn rekey(&mut self, api_key: SecretString) {
        match self.mounted.as_mut() {
            Some(m) => {
                m.dns.rekey(api_key.clone());
                m.shorturls.rekey(api_key);
                info!(epoch = self.epoch, "credential changed, refetching");
            }
            None => self.mount(api_key),
        }
    }

    fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            info!(epoch = self.epoch, "verticals unmounted");
        }
    }
}

impl<D: Backend<Dns>, S: Backend<Shorturls>> Drop for Console<D, S> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
