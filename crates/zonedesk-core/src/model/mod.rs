// ── Console domain model ──
//
// List items the verticals display and the drafts their forms edit.
// Items are converted from the wire types in `convert`; drafts are the
// editable, all-text side of a write.

pub mod draft;
pub mod record;
pub mod shortlink;

// ── Re-exports ──────────────────────────────────────────────────────

pub use draft::{DnsDraft, Draft, ShorturlDraft};
pub use record::{RECORD_TYPES, RecordSet, RecordType, RecordValue};
pub use shortlink::ShortLink;
