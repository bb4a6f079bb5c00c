// CMS HTTP client
//
// Wraps `reqwest::Client` with collection URL construction, cache
// suppression, and envelope unwrapping. Constructed explicitly and handed
// to the fetchers, so tests can point it at a mock server.

use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

use super::{CmsError, Query};
use crate::config::SiteConfig;

/// Directus wraps every collection read as `{ "data": [...] }`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

/// Directus error body: `{ "errors": [{ "message": "..." }] }`.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    message: Option<String>,
}

/// REST client for the content collections.
#[derive(Debug, Clone)]
pub struct CmsClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CmsClient {
    /// Build a client from site configuration.
    pub fn new(config: &SiteConfig) -> Result<Self, CmsError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("bulletin/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let base_url = Url::parse(&config.cms_url)?;
        Ok(Self::with_client(builder.build()?, base_url))
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The CMS base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/items/{collection}`
    pub(crate) fn items_url(&self, collection: &str) -> Result<Url, CmsError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/items/{collection}"))?)
    }

    /// Read a whole collection, optionally filtered.
    ///
    /// Every request carries `Cache-Control: no-store` so content edits
    /// show up on the next page load.
    pub async fn read_items<T: DeserializeOwned>(
        &self,
        collection: &str,
        query: Option<&Query>,
    ) -> Result<Vec<T>, CmsError> {
        let url = self.items_url(collection)?;
        debug!("GET {} {:?}", url, query);

        let mut request = self.http.get(url).headers(no_cache_headers());
        if let Some(query) = query {
            request = request.query(&query.to_pairs());
        }

        let resp = request.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CmsError::Upstream {
                status: status.as_u16(),
                message: upstream_message(&body),
            });
        }

        let body = resp.text().await?;
        trace!("{} bytes from {}", body.len(), collection);

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| CmsError::Decode {
                collection: collection.to_string(),
                message: format!("{e} (body preview: {:?})", preview(&body)),
            })?;

        Ok(envelope.data)
    }
}

fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store, no-cache"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers
}

fn upstream_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.errors.into_iter().find_map(|e| e.message))
        .unwrap_or_else(|| preview(body).to_string())
}

fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CmsClient {
        CmsClient::with_client(reqwest::Client::new(), Url::parse(base).unwrap())
    }

    #[test]
    fn test_items_url() {
        let url = client("https://cms.example.org/").items_url("events").unwrap();
        assert_eq!(url.as_str(), "https://cms.example.org/items/events");

        let url = client("https://example.org/cms").items_url("tags").unwrap();
        assert_eq!(url.as_str(), "https://example.org/cms/items/tags");
    }

    #[test]
    fn test_upstream_message() {
        let body = r#"{"errors":[{"message":"You don't have permission"}]}"#;
        assert_eq!(upstream_message(body), "You don't have permission");
        assert_eq!(upstream_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_preview_respects_char_boundary() {
        let body = "é".repeat(150);
        assert_eq!(preview(&body).chars().count(), 100);
    }
}
