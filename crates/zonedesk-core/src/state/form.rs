// ── Form state ──
//
// One draft and the status of the last submission. Submissions are
// numbered; results carry the number they belong to and anything for an
// older submission is ignored. A rejected write arrives in two steps:
// the status first, the server's message once the body has been read.

use serde::Serialize;
use tracing::debug;

/// What a submission asks the service to do with the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WriteKind {
    /// Create or replace.
    Save,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending { kind: WriteKind },
    /// `status` is absent when no response arrived at all.
    Failed {
        status: Option<u16>,
        message: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FormState<D> {
    pub draft: D,
    pub status: SubmitStatus,
    /// Number of the most recent submission.
    pub submission: u64,
}

impl<D: Default> FormState<D> {
    pub fn is_sending(&self) -> bool {
        matches!(self.status, SubmitStatus::Sending { .. })
    }

    /// Start a submission. `None` while one is already in flight.
    pub fn begin_submit(&mut self, kind: WriteKind) -> Option<u64> {
        if self.is_sending() {
            debug!(submission = self.submission, "submit ignored: already sending");
            return None;
        }
        self.submission += 1;
        self.status = SubmitStatus::Sending { kind };
        Some(self.submission)
    }

    /// The write was accepted: clear the draft. Returns `false` if the
    /// result belonged to another submission.
    pub fn succeed(&mut self, submission: u64) -> bool {
        if !self.awaiting(submission) {
            return false;
        }
        self.draft = D::default();
        self.status = SubmitStatus::Idle;
        true
    }

    /// The write failed. The draft is kept so the user can fix and retry.
    pub fn fail(&mut self, submission: u64, status: Option<u16>, message: Option<String>) -> bool {
        if !self.awaiting(submission) {
            return false;
        }
        self.status = SubmitStatus::Failed { status, message };
        true
    }

    /// Second step of a rejection: fill in the server's message.
    pub fn attach_message(&mut self, submission: u64, message: Option<String>) -> bool {
        if submission != self.submission {
            return false;
        }
        match (&mut self.status, message) {
            (SubmitStatus::Failed { message: slot @ None, .. }, Some(m)) => {
                *slot = Some(m);
                true
            }
            _ => false,
        }
    }

    /// Text for the form's error line.
    pub fn error_text(&self) -> Option<String> {
        let SubmitStatus::Failed { status, message } = &self.status else {
            return None;
        };
        Some(match (status, message) {
            (Some(s), Some(m)) => format!("{s}: {m}"),
            (Some(s), None) => s.to_string(),
            (None, Some(m)) => m.clone(),
            (None, None) => "request failed".into(),
        })
    }

    fn awaiting(&self, submission: u64) -> bool {
        submission == self.submission && self.is_sending()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn double_submit_is_ignored() {
        let mut form: FormState<String> = FormState::default();
        assert_eq!(form.begin_submit(WriteKind::Save), Some(1));
        assert_eq!(form.begin_submit(WriteKind::Save), None);
        assert_eq!(form.submission, 1);
    }

    #[test]
    fn success_resets_draft() {
        let mut form = FormState {
            draft: "typed".to_owned(),
            ..FormState::default()
        };
        let n = form.begin_submit(WriteKind::Save).unwrap();
        assert!(form.succeed(n));
        assert_eq!(form.draft, "");
        assert_eq!(form.status, SubmitStatus::Idle);
    }

    #[test]
    fn rejection_is_shown_in_two_steps() {
        let mut form = FormState {
            draft: "typed".to_owned(),
            ..FormState::default()
        };
        let n = form.begin_submit(WriteKind::Save).unwrap();

        form.fail(n, Some(422), None);
        assert_eq!(form.error_text().as_deref(), Some("422"));

        assert!(form.attach_message(n, Some("bad ttl".into())));
        assert_eq!(form.error_text().as_deref(), Some("422: bad ttl"));
        assert_eq!(form.draft, "typed");
    }

    #[test]
    fn late_message_for_older_submission_is_ignored() {
        let mut form: FormState<String> = FormState::default();
        let first = form.begin_submit(WriteKind::Save).unwrap();
        form.fail(first, Some(422), None);

        let second = form.begin_submit(WriteKind::Save).unwrap();
        assert!(!form.attach_message(first, Some("stale".into())));
        assert!(form.is_sending());

        form.fail(second, Some(400), None);
        assert!(!form.attach_message(first, Some("stale".into())));
        assert_eq!(form.error_text().as_deref(), Some("400"));
    }

    #[test]
    fn unreachable_has_message_only() {
        let mut form: FormState<String> = FormState::default();
        let n = form.begin_submit(WriteKind::Delete).unwrap();
        form.fail(n, None, Some("connection refused".into()));
        assert_eq!(form.error_text().as_deref(), Some("connection refused"));
    }

    #[test]
    fn missing_body_message_keeps_status_only() {
        let mut form: FormState<String> = FormState::default();
        let n = form.begin_submit(WriteKind::Save).unwrap();
        form.fail(n, Some(500), None);
        assert!(!form.attach_message(n, None));
        assert_eq!(form.error_text().as_deref(), Some("500"));
    }
}
