//! Google Programmable Search Engine (Custom Search JSON API).
//!
//! Each request sends the API key, the engine id (`cx`), the query and the
//! page size, and reads `items[].{title, link, snippet}` from the JSON body.

use std::fmt;

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::provider::SearchProvider;
use crate::query::SiteQuery;
use crate::types::RawResult;

/// Production endpoint of the Custom Search JSON API.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// API key and search engine id for the Custom Search API.
///
/// Passed explicitly at construction; nothing here reads the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct CseCredentials {
    pub api_key: String,
    pub cx: String,
}

impl CseCredentials {
    pub fn new(api_key: impl Into<String>, cx: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            cx: cx.into(),
        }
    }

    /// Rejects blank key or engine id.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.api_key.trim().is_empty() {
            return Err(SearchError::Credentials("API key is empty".into()));
        }
        if self.cx.trim().is_empty() {
            return Err(SearchError::Credentials("search engine id (cx) is empty".into()));
        }
        Ok(())
    }
}

impl fmt::Debug for CseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CseCredentials")
            .field("api_key", &"<redacted>")
            .field("cx", &self.cx)
            .finish()
    }
}

/// Custom Search JSON API client.
#[derive(Debug, Clone)]
pub struct GoogleCseProvider {
    client: reqwest::Client,
    credentials: CseCredentials,
    base_url: String,
    results_per_query: u32,
}

impl GoogleCseProvider {
    /// Build a provider from explicit credentials and search settings.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Credentials`] for blank credentials,
    /// [`SearchError::Config`] for an invalid `config`, or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(credentials: CseCredentials, config: &SearchConfig) -> Result<Self, SearchError> {
        credentials.validate()?;
        config.validate()?;
        Ok(Self {
            client: http::build_client(config)?,
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            results_per_query: config.results_per_query,
        })
    }

    /// Point the provider at a different endpoint (used by tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl SearchProvider for GoogleCseProvider {
    async fn search(&self, query: &SiteQuery) -> Result<Vec<RawResult>, SearchError> {
        let q = query.render();
        tracing::trace!(query = %q, "Google CSE search");

        let num = self.results_per_query.to_string();
        let params = [
            ("key", self.credentials.api_key.as_str()),
            ("cx", self.credentials.cx.as_str()),
            ("q", q.as_str()),
            ("num", num.as_str()),
        ];

        // `without_url` keeps the API key out of error messages.
        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                SearchError::Http(format!("Google CSE request failed: {}", e.without_url()))
            })?
            .error_for_status()
            .map_err(|e| SearchError::Http(format!("Google CSE HTTP error: {}", e.without_url())))?;

        let body = response.text().await.map_err(|e| {
            SearchError::Http(format!(
                "Google CSE response read failed: {}",
                e.without_url()
            ))
        })?;

        tracing::trace!(bytes = body.len(), "Google CSE response received");

        parse_cse_response(&body, query.site.as_deref())
    }

    fn name(&self) -> &'static str {
        "google-cse"
    }
}

#[derive(Debug, Deserialize)]
struct CseResponse {
    #[serde(default)]
    items: Vec<CseItem>,
}

#[derive(Debug, Deserialize)]
struct CseItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: String,
}

/// Decode a Custom Search JSON body into raw results.
///
/// Items without a link are skipped. A body with no `items` key (the API's
/// answer to a query with zero hits) yields an empty list.
pub(crate) fn parse_cse_response(
    body: &str,
    site: Option<&str>,
) -> Result<Vec<RawResult>, SearchError> {
    let response: CseResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("invalid Google CSE response: {e}")))?;

    Ok(response
        .items
        .into_iter()
        .filter_map(|item| {
            let link = item.link.filter(|l| !l.trim().is_empty())?;
            Some(RawResult {
                title: item.title,
                link,
                snippet: item.snippet,
                source: site.map(str::to_string),
            })
        })
        .collect())
}
