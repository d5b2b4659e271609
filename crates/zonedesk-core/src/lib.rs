//! View-state and runtime for the zonedesk console.
//!
//! The console manages two remote resources behind one API key: the
//! records of a DNS zone and a short-URL table. Both are presented the same
//! way, as a read-only list plus a submission form, so this crate models
//! them once and instantiates twice:
//!
//! - **[`Resource`]**: describes one vertical (item type, draft type,
//!   natural key, display row). [`Dns`] and [`Shorturls`] implement it.
//!
//! - **[`VerticalState`]**: explicit, serializable list and form state,
//!   changed only by [`reduce`] in response to a [`VerticalAction`]. The
//!   reducer returns an [`Effect`] for the runtime to perform.
//!
//! - **[`Backend`]**: async list/write seam over the remote services.
//!   [`PdnsBackend`] and [`ShorturlBackend`] wrap the `zonedesk-api`
//!   clients; tests substitute in-memory fakes.
//!
//! - **[`Session`]**: the credential holder. Saving a key mounts the
//!   verticals, saving a different one re-keys them.
//!
//! - **[`Console`]**: ties it together. Effects run as tokio tasks that
//!   report back through an unbounded channel of [`ConsoleEvent`]s, which
//!   the UI loop feeds into [`Console::apply`]. A successful write bumps the
//!   vertical's [`ChangeFeed`], and the list refetches exactly once.

pub mod backend;
pub mod config;
pub mod console;
pub mod convert;
pub mod error;
pub mod feed;
pub mod model;
pub mod resource;
pub mod session;
pub mod state;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{Backend, PdnsBackend, ShorturlBackend, WriteReply};
pub use config::ConsoleConfig;
pub use console::{ApiConsole, Console, ConsoleEvent};
pub use error::CoreError;
pub use feed::ChangeFeed;
pub use model::{DnsDraft, Draft, RecordSet, RecordType, RecordValue, ShortLink, ShorturlDraft};
pub use resource::{Dns, Resource, Shorturls, VerticalKind};
pub use session::{Session, SessionAction, SessionEffect};
pub use state::{
    reduce, Effect, FormState, ListState, SubmitStatus, VerticalAction, VerticalState, WriteKind,
};
