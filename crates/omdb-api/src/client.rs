//! `OmdbClient` - OMDb API client implementation.

use std::fmt;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use crate::api::LocalOmdbApi;
use crate::error::{OmdbError, Result};
use crate::lookup::{decode_film, lookup_query};
use crate::search::{decode_search_page, search_query};
use crate::types::{Film, SearchOptions, SearchPage, SearchResult};

/// Default base URL for the OMDb API.
const DEFAULT_BASE_URL: &str = "http://www.omdbapi.com/";

/// Default User-Agent sent when no HTTP client is supplied.
const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// OMDb API client.
///
/// Holds the API key; immutable once built and safe to share across tasks.
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// API key, sent as the `apikey` query parameter.
    api_key: String,
}

impl fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Builder for `OmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct OmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    http_client: Option<Client>,
}

impl OmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            http_client: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required). The key is not validated; OMDb rejects
    /// bad keys on the first request.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (default: `omdb-api/<version>`).
    ///
    /// Ignored when an HTTP client is supplied.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Uses a pre-configured HTTP client (timeouts, proxies, ...).
    #[must_use]
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<OmdbClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| OmdbError::Builder(String::from("api_key is required")))?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| OmdbError::Builder(format!("invalid default base URL: {e}")))?
        };

        let http_client = if let Some(client) = self.http_client {
            client
        } else {
            let user_agent = self
                .user_agent
                .unwrap_or_else(|| String::from(DEFAULT_USER_AGENT));
            Client::builder()
                .user_agent(&user_agent)
                .gzip(true)
                .build()
                .map_err(|e| OmdbError::Builder(format!("failed to build HTTP client: {e}")))?
        };

        Ok(OmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl OmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> OmdbClientBuilder {
        OmdbClientBuilder::new()
    }

    /// Builds the request URL: `apikey` first, then `query` in order.
    fn request_url(&self, query: &[(&str, String)]) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        url
    }

    /// Sends a GET request and returns the body text.
    ///
    /// The status code is not checked: OMDb reports failures (including a
    /// bad key with HTTP 401) in the JSON body.
    #[instrument(skip_all)]
    async fn get_text(&self, query: &[(&str, String)]) -> Result<String> {
        let url = self.request_url(query);

        tracing::debug!(params = ?query, "OMDb API request");

        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(%status, "OMDb API returned non-success status");
        }

        Ok(response.text().await?)
    }
}

impl LocalOmdbApi for OmdbClient {
    #[instrument(skip_all, fields(id = %id))]
    async fn fetch(&self, id: &str) -> Result<Film> {
        let body = self.get_text(&lookup_query(id)).await?;
        decode_film(&body)
    }

    #[instrument(skip_all, fields(query = %query))]
    async fn search(
        &self,
        query: &str,
        options: Option<&SearchOptions>,
    ) -> Result<Vec<SearchResult>> {
        let page = self.search_page(query, options, 1).await?;
        Ok(page.results)
    }

    #[instrument(skip_all, fields(query = %query, page = page))]
    async fn search_page(
        &self,
        query: &str,
        options: Option<&SearchOptions>,
        page: u32,
    ) -> Result<SearchPage> {
        let body = self.get_text(&search_query(query, options, page)).await?;
        decode_search_page(&body, page)
    }
}
