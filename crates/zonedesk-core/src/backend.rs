// ── Backend seam ──
//
// What a vertical needs from the outside world: list everything, and
// send one draft. The API-backed implementations wrap the zonedesk-api
// clients; tests plug in in-memory fakes.

use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use secrecy::SecretString;
use tracing::debug;
use zonedesk_api::{PdnsClient, ShorturlClient, Ttl, WriteOutcome};

use crate::config::ConsoleConfig;
use crate::error::CoreError;
use crate::model::{DnsDraft, RecordSet, ShortLink, ShorturlDraft};
use crate::resource::{Dns, Resource, Shorturls};
use crate::state::WriteKind;

/// A write that got an HTTP response.
pub enum WriteReply {
    Accepted,
    /// The status is known now; `message` resolves once the body is read.
    Rejected {
        status: u16,
        message: BoxFuture<'static, Option<String>>,
    },
}

impl fmt::Debug for WriteReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("Accepted"),
            Self::Rejected { status, .. } => {
                f.debug_struct("Rejected").field("status", status).finish_non_exhaustive()
            }
        }
    }
}

impl From<WriteOutcome> for WriteReply {
    fn from(outcome: WriteOutcome) -> Self {
        match outcome {
            WriteOutcome::Accepted { .. } => Self::Accepted,
            WriteOutcome::Rejected(rejection) => Self::Rejected {
                status: rejection.status(),
                message: Box::pin(rejection.error_message()),
            },
        }
    }
}

pub trait Backend<R: Resource>: Send + Sync + 'static {
    fn list(
        &self,
        api_key: &SecretString,
    ) -> impl Future<Output = Result<Vec<R::Item>, CoreError>> + Send;

    /// `Err` only when no response was received.
    fn write(
        &self,
        api_key: &SecretString,
        kind: WriteKind,
        draft: &R::Draft,
    ) -> impl Future<Output = Result<WriteReply, CoreError>> + Send;
}

// ── DNS ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PdnsBackend {
    client: PdnsClient,
}

impl PdnsBackend {
    pub fn new(client: PdnsClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self, CoreError> {
        let client = PdnsClient::new(
            &config.base_url,
            &config.pdns_prefix,
            &config.zone,
            &config.transport(),
        )?;
        debug!(url = %client.zone_url(), "zone backend ready");
        Ok(Self::new(client))
    }
}

impl Backend<Dns> for PdnsBackend {
    async fn list(&self, api_key: &SecretString) -> Result<Vec<RecordSet>, CoreError> {
        let rrsets = self.client.list_rrsets(api_key).await?;
        Ok(rrsets.into_iter().map(RecordSet::from).collect())
    }

    async fn write(
        &self,
        api_key: &SecretString,
        kind: WriteKind,
        draft: &DnsDraft,
    ) -> Result<WriteReply, CoreError> {
        let rtype = draft.rtype.as_str();
        let outcome = match kind {
            WriteKind::Save => {
                self.client
                    .replace_rrset(
                        api_key,
                        &draft.name,
                        rtype,
                        Ttl::from_input(&draft.ttl),
                        &draft.content,
                    )
                    .await?
            }
            WriteKind::Delete => self.client.delete_rrset(api_key, &draft.name, rtype).await?,
        };
        Ok(outcome.into())
    }
}

// ── Short URLs ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ShorturlBackend {
    client: ShorturlClient,
}

impl ShorturlBackend {
    pub fn new(client: ShorturlClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &ConsoleConfig) -> Result<Self, CoreError> {
        let client =
            ShorturlClient::new(&config.base_url, &config.surl_prefix, &config.transport())?;
        debug!(url = %client.api_url(), "short-URL backend ready");
        Ok(Self::new(client))
    }
}

impl Backend<Shorturls> for ShorturlBackend {
    async fn list(&self, api_key: &SecretString) -> Result<Vec<ShortLink>, CoreError> {
        let slugs = self.client.list(api_key).await?;
        Ok(slugs.into_iter().map(ShortLink::from).collect())
    }

    async fn write(
        &self,
        api_key: &SecretString,
        kind: WriteKind,
        draft: &ShorturlDraft,
    ) -> Result<WriteReply, CoreError> {
        let outcome = match kind {
            WriteKind::Save => self.client.put(api_key, &draft.slug, &draft.target).await?,
            WriteKind::Delete => self.client.delete(api_key, &draft.slug).await?,
        };
        Ok(outcome.into())
    }
}
