// Shared transport configuration and request helpers.
//
// Both the zone client and the short-URL client build their
// `reqwest::Client` and decode responses through this module.

use std::time::Duration;

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::auth::{api_key_value, API_KEY_HEADER};
use crate::error::Error;
use crate::write::{Rejection, WriteOutcome};

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Accept any certificate (for a self-signed reverse proxy).
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("zonedesk/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(self.accept_invalid_certs)
            .build()
            .map_err(|e| Error::ClientBuild(e.to_string()))
    }
}

/// Append `path` to the base URL's path, keeping any prefix the base has.
///
/// `http://host:8000` + `/surl/api` → `http://host:8000/surl/api`;
/// `http://host/proxy/` + `/surl/api` → `http://host/proxy/surl/api`.
pub(crate) fn join_path(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    let suffix = path.trim_start_matches('/');
    url.set_path(&format!("{prefix}/{suffix}"));
    url.set_query(None);
    url.set_fragment(None);
    url
}

// ── Error body shape shared by both services ─────────────────────────

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Extract the `error` field from a JSON error body.
pub(crate) fn parse_error_message(raw: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(raw)
        .ok()
        .and_then(|b| b.error)
}

// ── Request helpers ──────────────────────────────────────────────────

/// The bits every client needs to issue requests.
#[derive(Debug, Clone)]
pub(crate) struct Http {
    pub client: reqwest::Client,
    pub timeout: Duration,
    pub service: &'static str,
}

impl Http {
    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Send a GET with the API key and decode a JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        api_key: &SecretString,
    ) -> Result<T, Error> {
        debug!(service = self.service, "GET {url}");

        let resp = self
            .client
            .get(url)
            .header(API_KEY_HEADER, api_key_value(api_key)?)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        self.handle_response(resp).await
    }

    /// Attach the API key to a write request, send it, and classify the
    /// response without reading a rejected body.
    pub async fn send_write(
        &self,
        request: reqwest::RequestBuilder,
        api_key: &SecretString,
    ) -> Result<WriteOutcome, Error> {
        let resp = request
            .header(API_KEY_HEADER, api_key_value(api_key)?)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = resp.status();
        if status.is_success() {
            debug!(service = self.service, %status, "write accepted");
            Ok(WriteOutcome::Accepted {
                status: status.as_u16(),
            })
        } else {
            debug!(service = self.service, %status, "write rejected");
            Ok(WriteOutcome::Rejected(Rejection::new(self.service, resp)))
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await.map_err(|e| self.map_send_error(e))?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else if status == reqwest::StatusCode::UNAUTHORIZED {
            Err(Error::Unauthorized {
                service: self.service,
            })
        } else {
            let raw = resp.text().await.unwrap_or_default();
            Err(Error::Api {
                service: self.service,
                status: status.as_u16(),
                message: parse_error_message(&raw),
            })
        }
    }
}
