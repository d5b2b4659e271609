// Outcome of a write request (PATCH / PUT / DELETE).
//
// A rejected write is a normal outcome, not an `Error`: the form shows the
// status as soon as the response head arrives and fills in the message once
// the body has been read.

use tracing::debug;

use crate::transport::parse_error_message;

/// Result of a write that produced an HTTP response.
#[derive(Debug)]
pub enum WriteOutcome {
    /// 2xx: the service applied the change.
    Accepted { status: u16 },
    /// Non-2xx. The body has not been read yet.
    Rejected(Rejection),
}

/// A non-success write response whose body is still on the wire.
#[derive(Debug)]
pub struct Rejection {
    service: &'static str,
    status: reqwest::StatusCode,
    response: reqwest::Response,
}

impl Rejection {
    pub(crate) fn new(service: &'static str, response: reqwest::Response) -> Self {
        Self {
            service,
            status: response.status(),
            response,
        }
    }

    /// Numeric HTTP status, available without touching the body.
    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    /// Read the body and pull out its `error` field.
    ///
    /// Returns `None` when the body is unreadable, not JSON, or has no
    /// `error` string.
    pub async fn error_message(self) -> Option<String> {
        match self.response.text().await {
            Ok(raw) => parse_error_message(&raw),
            Err(e) => {
                debug!(service = self.service, error = %e, "failed to read rejection body");
                None
            }
        }
    }
}
