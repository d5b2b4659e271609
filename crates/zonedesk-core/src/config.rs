// ── Runtime console configuration ──
//
// Describes *where* the two services live. It never carries the API key:
// the credential only ever comes from the credential panel (or a one-off
// command-line/env value) and lives in memory. The TUI builds a
// `ConsoleConfig` from its config layer and hands it in.

use std::time::Duration;

use url::Url;
use zonedesk_api::TransportConfig;

pub const DEFAULT_ZONE: &str = "c3.wtf.";
pub const DEFAULT_PDNS_PREFIX: &str = "/pdns";
pub const DEFAULT_SURL_PREFIX: &str = "/surl/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Endpoints and transport tuning for one console session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Proxy origin both services are mounted under
    /// (e.g. `http://localhost:8000`).
    pub base_url: Url,
    /// Zone managed by the DNS vertical, trailing dot included.
    pub zone: String,
    /// Path prefix of the zone API.
    pub pdns_prefix: String,
    /// Path of the short-URL collection.
    pub surl_prefix: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Skip TLS verification (self-signed proxies).
    pub accept_invalid_certs: bool,
}

impl ConsoleConfig {
    pub fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}
