// ── Vertical view-state ──
//
// Plain data plus pure transitions. Nothing in here performs I/O; the
// reducer hands back an `Effect` and the console runs it.

mod form;
mod list;
mod vertical;

pub use form::{FormState, SubmitStatus, WriteKind};
pub use list::ListState;
pub use vertical::{reduce, Effect, VerticalAction, VerticalState};
