use thiserror::Error;

/// Top-level error type for the `zonedesk-api` crate.
///
/// Covers every failure mode of the two REST surfaces that does not end
/// in an HTTP response for a write. Rejected writes are not errors here:
/// they come back as [`WriteOutcome::Rejected`](crate::WriteOutcome) so the
/// caller can show the status before the body has been read.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The API key contains bytes that cannot be sent as a header value.
    #[error("API key is not a valid header value")]
    MalformedApiKey,

    /// The service answered a read with 401.
    #[error("API key rejected by {service}")]
    Unauthorized { service: &'static str },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    // ── Service ─────────────────────────────────────────────────────
    /// A read came back with a non-success status.
    #[error("{service} returned HTTP {status}{}", message_suffix(.message))]
    Api {
        service: &'static str,
        status: u16,
        message: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_ref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl Error {
    /// Returns `true` if the request never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// HTTP status attached to this error, if there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
