// Async client for the short-URL API.
//
// Base path: {base}{prefix}     (collection)
//            {base}{prefix}/{slug}
// Auth: X-API-Key header, per request

use secrecy::SecretString;
use tracing::debug;
use url::Url;

use super::types::{PutShorturl, Shorturl};
use crate::error::Error;
use crate::transport::{join_path, Http, TransportConfig};
use crate::write::WriteOutcome;

const SERVICE: &str = "short-URL API";

#[derive(Debug, Clone)]
pub struct ShorturlClient {
    http: Http,
    api_url: Url,
}

impl ShorturlClient {
    /// Build from the proxy base URL and the path the API is mounted
    /// under (e.g. `/surl/api`).
    pub fn new(base_url: &Url, prefix: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let client = transport.build_client()?;
        Ok(Self::with_client(client, transport, join_path(base_url, prefix)))
    }

    /// Wrap an existing `reqwest::Client` and a fully-formed collection URL.
    pub fn with_client(client: reqwest::Client, transport: &TransportConfig, api_url: Url) -> Self {
        Self {
            http: Http {
                client,
                timeout: transport.timeout,
                service: SERVICE,
            },
            api_url,
        }
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// `{api_url}/{slug}`. Slashes inside the slug stay path separators;
    /// the server takes everything after the collection path as the slug.
    fn slug_url(&self, slug: &str) -> Url {
        join_path(&self.api_url, slug)
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub async fn list(&self, api_key: &SecretString) -> Result<Vec<Shorturl>, Error> {
        let slugs: Vec<Shorturl> = self.http.get_json(self.api_url.clone(), api_key).await?;
        debug!(count = slugs.len(), "short URLs fetched");
        Ok(slugs)
    }

    /// Create or replace the mapping for `slug`.
    pub async fn put(
        &self,
        api_key: &SecretString,
        slug: &str,
        target: &str,
    ) -> Result<WriteOutcome, Error> {
        let url = self.slug_url(slug);
        debug!(service = SERVICE, "PUT {url}");

        let body = PutShorturl {
            target: target.to_owned(),
        };
        let request = self.http.client.put(url).json(&body);
        self.http.send_write(request, api_key).await
    }

    pub async fn delete(&self, api_key: &SecretString, slug: &str) -> Result<WriteOutcome, Error> {
        let url = self.slug_url(slug);
        debug!(service = SERVICE, "DELETE {url}");

        let request = self.http.client.delete(url);
        self.http.send_write(request, api_key).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> ShorturlClient {
        let base = Url::parse("http://localhost:8000").unwrap();
        ShorturlClient::new(&base, "/surl/api", &TransportConfig::default()).unwrap()
    }

    #[test]
    fn slug_urls() {
        let c = client();
        assert_eq!(c.api_url().as_str(), "http://localhost:8000/surl/api");
        assert_eq!(c.slug_url("b").as_str(), "http://localhost:8000/surl/api/b");
        assert_eq!(
            c.slug_url("docs/v1").as_str(),
            "http://localhost:8000/surl/api/docs/v1"
        );
        assert_eq!(
            c.slug_url("a b?").as_str(),
            "http://localhost:8000/surl/api/a%20b%3F"
        );
    }
}
