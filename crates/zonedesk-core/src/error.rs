// ── Core error types ──
//
// User-facing errors from zonedesk-core. The list views print these
// verbatim on their error line, so the messages are written for people,
// not for logs. The `From<zonedesk_api::Error>` impl folds transport-layer
// detail into a handful of variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach {service}: {reason}")]
    ConnectionFailed { service: String, reason: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<zonedesk_api::Error> for CoreError {
    fn from(err: zonedesk_api::Error) -> Self {
        match err {
            zonedesk_api::Error::MalformedApiKey => CoreError::AuthenticationFailed {
                message: "API key contains characters that cannot be sent".into(),
            },
            zonedesk_api::Error::Unauthorized { service } => CoreError::AuthenticationFailed {
                message: format!("API key rejected by {service}"),
            },
            zonedesk_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if err.is_network() {
                    CoreError::ConnectionFailed {
                        service: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), |u| u.origin().ascii_serialization()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: err.status(),
                    }
                }
            }
            zonedesk_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            zonedesk_api::Error::ClientBuild(reason) => CoreError::Config {
                message: format!("HTTP client: {reason}"),
            },
            err @ zonedesk_api::Error::Api { status, .. } => CoreError::Api {
                message: err.to_string(),
                status: Some(status),
            },
            zonedesk_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected response: {message}"))
            }
        }
    }
}
