//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use zonedesk_core::{Dns, SessionAction, Shorturls, VerticalAction, VerticalState};

use crate::screen::PanelId;

/// What the credential panel shows. The key itself never leaves the
/// console; only its on-screen rendering does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialView {
    /// Typed key, masked or clear per `masked`.
    pub display: String,
    pub masked: bool,
    /// Typed key differs from the saved one.
    pub dirty: bool,
    /// A non-empty key is in effect.
    pub saved: bool,
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ────────────────────────────────────────────────────
    Quit,
    Tick,
    Resize(u16, u16),

    // ── Navigation ───────────────────────────────────────────────────
    FocusPanel(PanelId),
    FocusNext,
    FocusPrev,
    ToggleHelp,

    // ── Credential ───────────────────────────────────────────────────
    Credential(SessionAction),
    CredentialUpdated(CredentialView),
    /// The verticals were mounted (`true`) or torn down (`false`).
    MountChanged(bool),

    // ── Verticals ────────────────────────────────────────────────────
    Dns(VerticalAction<Dns>),
    Shorturls(VerticalAction<Shorturls>),
    DnsUpdated(Arc<VerticalState<Dns>>),
    ShorturlsUpdated(Arc<VerticalState<Shorturls>>),
}
