// ── Vertical reducer ──
//
// List + form for one resource, and the single function allowed to change
// them. `reduce` is pure: it mutates the state it is given and describes
// the I/O to perform as an `Effect`.

use serde::Serialize;
use tracing::{debug, warn};

use super::form::{FormState, WriteKind};
use super::list::ListState;
use crate::model::Draft;
use crate::resource::Resource;

#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = ""))]
pub struct VerticalState<R: Resource> {
    pub list: ListState<R::Item>,
    pub form: FormState<R::Draft>,
}

impl<R: Resource> Default for VerticalState<R> {
    fn default() -> Self {
        Self {
            list: ListState::default(),
            form: FormState::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum VerticalAction<R: Resource> {
    // ── Form input ───────────────────────────────────────────────────
    FieldChanged { field: String, value: String },
    /// Copy the highlighted list item into the draft.
    EditSelected,
    Submit(WriteKind),

    // ── Write results ────────────────────────────────────────────────
    SubmitSucceeded { submission: u64 },
    /// The service answered with a non-success status.
    SubmitFailed { submission: u64, status: u16 },
    /// The body of a failed write has been read.
    SubmitErrorBody {
        submission: u64,
        message: Option<String>,
    },
    /// No response at all (connection refused, timeout).
    SubmitUnreachable { submission: u64, message: String },

    // ── List ─────────────────────────────────────────────────────────
    FetchStarted,
    FetchSucceeded {
        generation: u64,
        items: Vec<R::Item>,
    },
    FetchFailed { generation: u64, message: String },
    SelectNext,
    SelectPrev,
}

/// I/O requested by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect<R: Resource> {
    /// Fetch the list; report back with `generation`.
    Fetch { generation: u64 },
    /// Send the draft; report back with `submission`.
    Write {
        submission: u64,
        kind: WriteKind,
        draft: R::Draft,
    },
    /// A write landed: notify the vertical's change feed.
    AnnounceChange,
}

pub fn reduce<R: Resource>(
    state: &mut VerticalState<R>,
    action: VerticalAction<R>,
) -> Option<Effect<R>> {
    match action {
        VerticalAction::FieldChanged { field, value } => {
            if !state.form.draft.set(&field, value) {
                debug!(vertical = %R::KIND, field = %field, "ignored invalid field change");
            }
            None
        }
        VerticalAction::EditSelected => {
            if let Some(draft) = state.list.selected_item().and_then(R::draft_from) {
                state.form.draft = draft;
            }
            None
        }
        VerticalAction::Submit(kind) => {
            let submission = state.form.begin_submit(kind)?;
            Some(Effect::Write {
                submission,
                kind,
                draft: state.form.draft.clone(),
            })
        }
        VerticalAction::SubmitSucceeded { submission } => state
            .form
            .succeed(submission)
            .then_some(Effect::AnnounceChange),
        VerticalAction::SubmitFailed { submission, status } => {
            warn!(vertical = %R::KIND, status, "write rejected");
            state.form.fail(submission, Some(status), None);
            None
        }
        VerticalAction::SubmitErrorBody {
            submission,
            message,
        } => {
            state.form.attach_message(submission, message);
            None
        }
        VerticalAction::SubmitUnreachable {
            submission,
            message,
        } => {
            warn!(vertical = %R::KIND, error = %message, "write failed without response");
            state.form.fail(submission, None, Some(message));
            None
        }
        VerticalAction::FetchStarted => Some(Effect::Fetch {
            generation: state.list.begin_fetch(),
        }),
        VerticalAction::FetchSucceeded { generation, items } => {
            state.list.finish(generation, items, R::key);
            None
        }
        VerticalAction::FetchFailed {
            generation,
            message,
        } => {
            state.list.fail(generation, message);
            None
        }
        VerticalAction::SelectNext => {
            state.list.select_next();
            None
        }
        VerticalAction::SelectPrev => {
            state.list.select_prev();
            None
        }
    }
}
