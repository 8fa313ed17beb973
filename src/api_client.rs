//! HTTP client for the Freshservice API.
//!
//! This module provides the `ApiClient` struct and its four verb primitives
//! (`fetch`, `create`, `replace`, `delete`). Every resource operation funnels
//! through them, so the success-status policy lives here and nowhere else:
//!
//! | verb      | method | success   |
//! |-----------|--------|-----------|
//! | `fetch`   | GET    | 200       |
//! | `create`  | POST   | 200, 201  |
//! | `replace` | PUT    | 200, 204  |
//! | `delete`  | DELETE | 200, 204  |
//!
//! Any other status comes back as a classified [`FreshError`]. The client
//! never retries; callers use [`FreshError::is_retryable`] to decide.
//!
//! # Security
//!
//! The API key is never logged. Error bodies are sanitized before they are
//! stored in an error.

use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::FreshError;
use crate::models::unwrap_envelope;
use crate::pagination::next_page_link;

/// Path prefix of the v2 REST API.
const API_PREFIX: &str = "/api/v2";

/// Content type sent and accepted on create/replace.
const JSON_CONTENT_TYPE: &str = "application/json";

/// Maximum length for HTTP error response bodies kept in errors.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Largest `per_page` Freshservice accepts.
pub const MAX_PER_PAGE: u32 = 100;

const FETCH_OK: &[StatusCode] = &[StatusCode::OK];
const CREATE_OK: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
const REPLACE_OK: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];
const DELETE_OK: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];

/// A successful response, exactly as received.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code (always within the verb's success set).
    pub status: StatusCode,

    /// Response headers.
    pub headers: HeaderMap,

    /// Response body text. Empty for most 204 responses.
    pub body: String,
}

impl RawResponse {
    /// Unwraps the envelope key of the body.
    pub fn unwrap_key<T>(&self, key: &str) -> Result<T, FreshError>
    where
        T: DeserializeOwned,
    {
        unwrap_envelope(&self.body, key)
    }

    /// Returns the next-page URI advertised by this response, if any.
    pub fn next_page(&self) -> Result<Option<String>, FreshError> {
        next_page_link(&self.headers)
    }
}

/// HTTP client for the Freshservice API.
///
/// Holds the API key and base URL; immutable after construction.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = ApiClient::new(&config)?;
///
/// let tickets = client.all_tickets(ListParams::new()).await?;
/// ```
#[derive(Clone)]
pub struct ApiClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Base URL for the API (e.g., `https://acme.freshservice.com/api/v2`).
    base_url: String,

    /// API key, sent as the basic-auth username with an empty password.
    /// SECURITY: Never log this value!
    api_key: String,

    /// Request timeout, kept for error reporting.
    timeout: Duration,

    /// Page budget used when a listing does not set its own.
    max_pages: u32,

    /// Inter-page pause used when a listing does not set its own.
    page_delay: Duration,
}

impl ApiClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `FreshError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, FreshError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("freshsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FreshError::HttpClient)?;

        Ok(Self {
            http,
            base_url: Self::normalize_base_url(&config.domain),
            api_key: config.api_key().to_string(),
            timeout: config.timeout,
            max_pages: config.max_pages,
            page_delay: config.page_delay,
        })
    }

    /// Normalizes the root URL so it ends with `/api/v2`.
    fn normalize_base_url(url: &str) -> String {
        let url = url.trim_end_matches('/');
        if url.ends_with(API_PREFIX) {
            url.to_string()
        } else if url.ends_with("/api") {
            format!("{}/v2", url)
        } else {
            format!("{}{}", url, API_PREFIX)
        }
    }

    /// Builds an absolute endpoint URL from a path and query pairs.
    ///
    /// Query values are percent-encoded.
    pub fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<String, FreshError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| FreshError::validation(format!("invalid endpoint {}: {}", path, e)))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }

        Ok(url.to_string())
    }

    // ========================================================================
    // Verb primitives
    // ========================================================================

    /// Issues a GET. Succeeds only on 200.
    pub async fn fetch(&self, url: &str) -> Result<RawResponse, FreshError> {
        self.send(Method::GET, url, None, FETCH_OK).await
    }

    /// Issues a POST with a JSON body. Succeeds on 200 or 201.
    ///
    /// `None` sends no body.
    pub async fn create(
        &self,
        url: &str,
        payload: Option<&serde_json::Value>,
    ) -> Result<RawResponse, FreshError> {
        self.send(Method::POST, url, payload, CREATE_OK).await
    }

    /// Issues a PUT with a JSON body. Succeeds on 200 or 204.
    ///
    /// `None` is valid for state-transition endpoints that take no body.
    pub async fn replace(
        &self,
        url: &str,
        payload: Option<&serde_json::Value>,
    ) -> Result<RawResponse, FreshError> {
        self.send(Method::PUT, url, payload, REPLACE_OK).await
    }

    /// Issues a DELETE without a body. Succeeds on 200 or 204.
    pub async fn delete(&self, url: &str) -> Result<RawResponse, FreshError> {
        self.send(Method::DELETE, url, None, DELETE_OK).await
    }

    /// Performs one round trip and checks the status against `accepted`.
    async fn send(
        &self,
        method: Method,
        url: &str,
        payload: Option<&serde_json::Value>,
        accepted: &[StatusCode],
    ) -> Result<RawResponse, FreshError> {
        tracing::debug!(method = %method, url = %url, "Making Freshservice API request");

        let mut req = self
            .http
            .request(method.clone(), url)
            .basic_auth(&self.api_key, Some(""));

        if matches!(method, Method::POST | Method::PUT) {
            req = req
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .header(ACCEPT, JSON_CONTENT_TYPE);
            if let Some(data) = payload {
                req = req.json(data);
            }
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                return FreshError::timeout(self.timeout, format!("{} {}", method, url));
            }
            FreshError::Http(e)
        })?;

        let status = response.status();
        if !accepted.contains(&status) {
            let err = self.handle_http_error(url, status, response).await;
            tracing::debug!(method = %method, url = %url, status = status.as_u16(), "Request rejected");
            return Err(err);
        }

        let headers = response.headers().clone();
        let body = response.text().await.map_err(FreshError::Http)?;

        tracing::trace!(status = status.as_u16(), body = %body, "Freshservice API response");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    /// Converts a rejected response into a classified error.
    async fn handle_http_error(
        &self,
        url: &str,
        status: StatusCode,
        response: reqwest::Response,
    ) -> FreshError {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs);

        let body = response.text().await.unwrap_or_default();
        let body = FreshError::sanitize_message(&body, &self.api_key);
        let body = truncate_body(body);

        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(retry_after = ?retry_after, "Rate limited by Freshservice");
        } else if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), "Freshservice server error");
        }

        let resource = url.strip_prefix(&self.base_url).unwrap_or(url);
        FreshError::from_status(status, resource, body, retry_after)
    }

    // ========================================================================
    // Pagination
    // ========================================================================

    /// Fetches a collection, following `link` headers until the last page.
    ///
    /// Items keep response order within and across pages. The pause and the
    /// page budget come from `params`, falling back to the client defaults.
    ///
    /// # Errors
    ///
    /// Propagates the first failing page fetch. Returns
    /// `FreshError::PageLimitExceeded` if more pages remain after the budget.
    pub async fn fetch_all<T>(
        &self,
        url: String,
        key: &str,
        params: &ListParams,
    ) -> Result<Vec<T>, FreshError>
    where
        T: DeserializeOwned,
    {
        let max_pages = params.max_pages.unwrap_or(self.max_pages);
        let delay = params.page_delay.unwrap_or(self.page_delay);

        let mut items = Vec::new();
        let mut next = Some(url);
        let mut pages = 0u32;

        while let Some(url) = next {
            if pages >= max_pages {
                tracing::warn!(key = key, limit = max_pages, "Page budget exhausted");
                return Err(FreshError::PageLimitExceeded { limit: max_pages });
            }
            if pages > 0 && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let response = self.fetch(&url).await?;
            pages += 1;

            let page: Vec<T> = response.unwrap_key(key)?;
            tracing::debug!(key = key, page = pages, items = page.len(), "Fetched page");
            items.extend(page);

            next = response.next_page()?;
        }

        Ok(items)
    }
}

fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body;
    }
    let mut cut = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...[truncated]", &body[..cut])
}

/// Parameters for listing calls.
///
/// Use the builder methods to shape the query and the paging policy.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Items per page (1-100).
    per_page: Option<u32>,

    /// Ask for `include=type_fields` (assets only).
    type_fields: bool,

    /// Pause between page fetches; `None` uses the client default.
    page_delay: Option<Duration>,

    /// Page budget; `None` uses the client default.
    max_pages: Option<u32>,
}

impl ListParams {
    /// Creates empty list parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of items per page.
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// Includes asset type fields in each asset.
    pub fn with_type_fields(mut self) -> Self {
        self.type_fields = true;
        self
    }

    /// Pauses between page fetches.
    pub fn with_page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

    /// Caps the number of pages followed.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Converts parameters to query pairs, validating ranges.
    pub(crate) fn to_query(&self) -> Result<Vec<(&'static str, String)>, FreshError> {
        let mut query = Vec::new();

        if let Some(per_page) = self.per_page {
            if per_page == 0 || per_page > MAX_PER_PAGE {
                return Err(FreshError::validation(format!(
                    "per_page must be between 1 and {}, got {}",
                    MAX_PER_PAGE, per_page
                )));
            }
            query.push(("per_page", per_page.to_string()));
        }

        if self.max_pages == Some(0) {
            return Err(FreshError::validation("max_pages must be at least 1"));
        }

        if self.type_fields {
            query.push(("include", "type_fields".to_string()));
        }

        Ok(query)
    }
}
