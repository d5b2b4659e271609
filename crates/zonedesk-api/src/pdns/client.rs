// Async client for the PowerDNS-style zone API.
//
// Base path: {base}{prefix}/api/v1/servers/localhost/zones/{zone}
// Auth: X-API-Key header, per request

use secrecy::SecretString;
use tracing::debug;
use url::Url;

use super::types::{PatchRequest, RrSet, RrSetChange, Ttl, Zone};
use crate::error::Error;
use crate::transport::{join_path, Http, TransportConfig};
use crate::write::WriteOutcome;

const SERVICE: &str = "zone API";

/// Client bound to a single zone.
///
/// The API key is not baked into the client: the console can change its
/// credential at any time, so every call takes the key explicitly.
#[derive(Debug, Clone)]
pub struct PdnsClient {
    http: Http,
    zone_url: Url,
}

impl PdnsClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from the proxy base URL, the path prefix the zone API is
    /// mounted under (e.g. `/pdns`), and the zone name.
    pub fn new(
        base_url: &Url,
        prefix: &str,
        zone: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let client = transport.build_client()?;
        Ok(Self::with_client(
            client,
            transport,
            Self::build_zone_url(base_url, prefix, zone),
        ))
    }

    /// Wrap an existing `reqwest::Client` and a fully-formed zone URL.
    pub fn with_client(client: reqwest::Client, transport: &TransportConfig, zone_url: Url) -> Self {
        Self {
            http: Http {
                client,
                timeout: transport.timeout,
                service: SERVICE,
            },
            zone_url,
        }
    }

    /// `{base}{prefix}/api/v1/servers/localhost/zones/{zone}`
    ///
    /// The zone is used as given, trailing dot included.
    pub fn build_zone_url(base_url: &Url, prefix: &str, zone: &str) -> Url {
        let prefix = prefix.trim_matches('/');
        let path = if prefix.is_empty() {
            format!("api/v1/servers/localhost/zones/{zone}")
        } else {
            format!("{prefix}/api/v1/servers/localhost/zones/{zone}")
        };
        join_path(base_url, &path)
    }

    pub fn zone_url(&self) -> &Url {
        &self.zone_url
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Fetch the whole zone.
    pub async fn get_zone(&self, api_key: &SecretString) -> Result<Zone, Error> {
        self.http.get_json(self.zone_url.clone(), api_key).await
    }

    /// Fetch the zone's rrsets in server order.
    pub async fn list_rrsets(&self, api_key: &SecretString) -> Result<Vec<RrSet>, Error> {
        let zone = self.get_zone(api_key).await?;
        debug!(count = zone.rrsets.len(), "zone fetched");
        Ok(zone.rrsets)
    }

    /// Apply a list of rrset changes in one `PATCH`.
    pub async fn patch_rrsets(
        &self,
        api_key: &SecretString,
        changes: Vec<RrSetChange>,
    ) -> Result<WriteOutcome, Error> {
        let url = self.zone_url.clone();
        debug!(service = SERVICE, changes = changes.len(), "PATCH {url}");

        let body = PatchRequest { rrsets: changes };
        let request = self.http.client.patch(url).json(&body);
        self.http.send_write(request, api_key).await
    }

    /// Replace the (name, type) rrset with one enabled record.
    pub async fn replace_rrset(
        &self,
        api_key: &SecretString,
        name: &str,
        rtype: &str,
        ttl: Ttl,
        content: &str,
    ) -> Result<WriteOutcome, Error> {
        self.patch_rrsets(api_key, vec![RrSetChange::replace(name, rtype, ttl, content)])
            .await
    }

    /// Delete the (name, type) rrset.
    pub async fn delete_rrset(
        &self,
        api_key: &SecretString,
        name: &str,
        rtype: &str,
    ) -> Result<WriteOutcome, Error> {
        self.patch_rrsets(api_key, vec![RrSetChange::delete(name, rtype)])
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zone_url_layout() {
        let base = Url::parse("http://localhost:8000").unwrap();
        assert_eq!(
            PdnsClient::build_zone_url(&base, "/pdns", "c3.wtf.").as_str(),
            "http://localhost:8000/pdns/api/v1/servers/localhost/zones/c3.wtf."
        );
        assert_eq!(
            PdnsClient::build_zone_url(&base, "", "example.org.").as_str(),
            "http://localhost:8000/api/v1/servers/localhost/zones/example.org."
        );
    }
}
