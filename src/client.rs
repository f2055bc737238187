//! Perma API client.
//!
//! Low-level HTTP client that handles authentication, request dispatch,
//! and uniform response interpretation. Endpoint methods are implemented
//! in the model modules and funnel every call through the helpers here.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use url::Url;

use crate::error::{PermaError, Result};

const DEFAULT_BASE_URL: &str = "https://api.perma.cc";
const USER_AGENT: &str = concat!("permapi/", env!("CARGO_PKG_VERSION"));

/// Expected API key shape: 40 lowercase alphanumeric characters.
const API_KEY_LEN: usize = 40;

/// Default number of archive detail polls before a safe delete proceeds
/// regardless of pending captures.
pub const SAFE_DELETE_MAX_ATTEMPTS: u32 = 10;

/// Default pause between archive detail polls during a safe delete.
pub const SAFE_DELETE_POLL_INTERVAL: Duration = Duration::from_secs(6);

/// Low-level Perma API client.
///
/// Holds the API key and endpoint origin, and exposes one method per
/// remote capability (`pull_user`, `pull_archive`, `delete_archive`, ...)
/// implemented in the model modules.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use permapi::PermaClient;
///
/// # async fn example() -> permapi::Result<()> {
/// // Create from environment variables
/// let client = PermaClient::from_env()?;
///
/// // Or configure manually
/// let client = PermaClient::builder()
///     .api_key("abcedfghijklmnopqrstuvwxyz12345678901234")
///     .base_url("https://api.perma.test:8000")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PermaClient {
    http: Client,
    base_url: Arc<Url>,
    api_key: Option<String>,
    throttle: Option<Duration>,
    safe_delete_poll_interval: Duration,
    safe_delete_max_attempts: u32,
}

impl std::fmt::Debug for PermaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermaClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`PermaClient`].
#[derive(Debug, Clone, Default)]
pub struct PermaClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    throttle: Option<Duration>,
    safe_delete_poll_interval: Option<Duration>,
    safe_delete_max_attempts: Option<u32>,
}

impl PermaClientBuilder {
    /// Set the API key. Must be 40 lowercase alphanumeric characters.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the endpoint root. Only the origin (scheme, host, port)
    /// is retained; any path or query is discarded.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Pause for this long before each request. Off by default.
    #[must_use]
    pub fn throttle(mut self, interval: Duration) -> Self {
        self.throttle = Some(interval);
        self
    }

    /// Override the pause between safe-delete polls
    /// (default [`SAFE_DELETE_POLL_INTERVAL`]).
    #[must_use]
    pub fn safe_delete_poll_interval(mut self, interval: Duration) -> Self {
        self.safe_delete_poll_interval = Some(interval);
        self
    }

    /// Override the safe-delete poll cap
    /// (default [`SAFE_DELETE_MAX_ATTEMPTS`]).
    #[must_use]
    pub fn safe_delete_max_attempts(mut self, attempts: u32) -> Self {
        self.safe_delete_max_attempts = Some(attempts);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`PermaError::InvalidApiKey`] if a key was supplied in the
    /// wrong format, or [`PermaError::InvalidBaseUrl`] if the base URL
    /// override does not parse as an absolute URL with a host.
    pub fn build(self) -> Result<PermaClient> {
        if let Some(key) = &self.api_key {
            if !is_valid_api_key(key) {
                return Err(PermaError::InvalidApiKey);
            }
        }

        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = parse_origin(raw)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(PermaError::Http)?;

        Ok(PermaClient {
            http,
            base_url: Arc::new(base_url),
            api_key: self.api_key,
            throttle: self.throttle,
            safe_delete_poll_interval: self
                .safe_delete_poll_interval
                .unwrap_or(SAFE_DELETE_POLL_INTERVAL),
            safe_delete_max_attempts: self
                .safe_delete_max_attempts
                .unwrap_or(SAFE_DELETE_MAX_ATTEMPTS),
        })
    }
}

fn is_valid_api_key(key: &str) -> bool {
    key.len() == API_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

/// Parse a base URL override, retaining only its origin.
fn parse_origin(raw: &str) -> Result<Url> {
    let invalid = || PermaError::InvalidBaseUrl(raw.to_string());

    let parsed = Url::parse(raw).map_err(|_| invalid())?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return Err(invalid());
    }

    Url::parse(&origin.ascii_serialization()).map_err(|_| invalid())
}

impl PermaClient {
    /// Create a builder with no key and the production endpoint.
    #[must_use]
    pub fn builder() -> PermaClientBuilder {
        PermaClientBuilder::default()
    }

    /// Create an authenticated client against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is not 40 lowercase alphanumeric
    /// characters.
    pub fn new(api_key: &str) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a keyless client. Only the public endpoints
    /// ([`pull_public_archives`](Self::pull_public_archives),
    /// [`pull_public_archive`](Self::pull_public_archive)) will succeed.
    pub fn anonymous() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a client from environment variables.
    ///
    /// Uses `PERMA_API_KEY` for authentication and optionally
    /// `PERMA_API_URL` for the endpoint root (defaults to
    /// `https://api.perma.cc`).
    ///
    /// # Errors
    ///
    /// Returns an error if `PERMA_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("PERMA_API_KEY").map_err(|_| {
            PermaError::ConfigMissing("PERMA_API_KEY environment variable not set".to_string())
        })?;

        let mut builder = Self::builder().api_key(api_key);
        if let Ok(base_url) = env::var("PERMA_API_URL") {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// Get the endpoint root (origin only).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether this client holds an API key.
    pub fn is_authenticated(&self) -> bool {
        self.api_key.is_some()
    }

    pub(crate) fn safe_delete_poll_interval(&self) -> Duration {
        self.safe_delete_poll_interval
    }

    pub(crate) fn safe_delete_max_attempts(&self) -> u32 {
        self.safe_delete_max_attempts
    }

    /// Build the `Authorization` header value, failing closed when no API
    /// key was supplied at construction.
    fn authorization(&self) -> Result<String> {
        match &self.api_key {
            Some(key) => Ok(format!("ApiKey {key}")),
            None => Err(PermaError::AuthRequired),
        }
    }

    /// Compose a request against `base_url + path`, attaching the
    /// authorization header on authenticated routes. Public routes carry
    /// no authorization header at all, even when a key is held.
    fn request(&self, method: Method, path: &str, authenticated: bool) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        let mut request = self.http.request(method, url);
        if authenticated {
            request = request.header(AUTHORIZATION, self.authorization()?);
        }
        Ok(request)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        if let Some(interval) = self.throttle {
            tokio::time::sleep(interval).await;
        }

        let response = request.send().await.map_err(PermaError::Http)?;
        Self::check_response(response).await
    }

    /// Make an authenticated GET request.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn get(&self, path: &str) -> Result<Response> {
        self.send(self.request(Method::GET, path, true)?).await
    }

    /// Make an authenticated GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub(crate) async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        self.send(self.request(Method::GET, path, true)?.query(query))
            .await
    }

    /// Make a GET request against a public route (no authorization header).
    #[tracing::instrument(skip(self))]
    pub(crate) async fn get_public(&self, path: &str) -> Result<Response> {
        self.send(self.request(Method::GET, path, false)?).await
    }

    /// Make a public GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub(crate) async fn get_public_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        self.send(self.request(Method::GET, path, false)?.query(query))
            .await
    }

    /// Make a POST request with a JSON body.
    #[tracing::instrument(skip(self, body))]
    pub(crate) async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        self.send(self.request(Method::POST, path, true)?.json(body))
            .await
    }

    /// Make a PATCH request with a JSON body. Only the supplied fields are
    /// sent, so absent options never clobber remote state.
    #[tracing::instrument(skip(self, body))]
    pub(crate) async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        self.send(self.request(Method::PATCH, path, true)?.json(body))
            .await
    }

    /// Make a bodyless PUT request (move operations).
    #[tracing::instrument(skip(self))]
    pub(crate) async fn put(&self, path: &str) -> Result<Response> {
        self.send(self.request(Method::PUT, path, true)?).await
    }

    /// Make a DELETE request. The success body (often empty) is ignored by
    /// callers.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn delete(&self, path: &str) -> Result<Response> {
        self.send(self.request(Method::DELETE, path, true)?).await
    }

    /// Classify a response: 2xx passes through for typed deserialization,
    /// anything else becomes an [`PermaError::Api`] carrying the status and
    /// the server's `detail` message when one was provided.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let detail = Self::extract_detail(response).await;
        Err(PermaError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    /// Extract the `detail` field from a failed response, if the body is
    /// JSON and carries one. An empty or non-JSON body is legal; the status
    /// alone conveys the error then.
    async fn extract_detail(response: Response) -> Option<String> {
        let body = response.text().await.ok()?;
        let json: serde_json::Value = serde_json::from_str(&body).ok()?;
        json.get("detail")?.as_str().map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMMY_API_KEY: &str = "abcedfghijklmnopqrstuvwxyz12345678901234";

    #[test]
    fn test_client_debug_redacts_api_key() {
        let client = PermaClient::new(DUMMY_API_KEY).unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("PermaClient"));
        assert!(debug.contains("base_url"));
        assert!(!debug.contains(DUMMY_API_KEY));
    }

    #[test]
    fn test_anonymous_client_uses_production_origin() {
        let client = PermaClient::anonymous().unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.perma.cc/");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_rejects_malformed_api_keys() {
        let too_long = format!("{DUMMY_API_KEY}a");
        let uppercase = DUMMY_API_KEY.to_uppercase();
        let non_ascii = DUMMY_API_KEY.replace('e', "\u{e9}");
        let invalid = [
            &DUMMY_API_KEY[..39], // too short
            too_long.as_str(),
            uppercase.as_str(),
            non_ascii.as_str(),
        ];
        for key in invalid {
            assert!(
                matches!(PermaClient::new(key), Err(PermaError::InvalidApiKey)),
                "accepted {key:?}"
            );
        }
    }

    #[test]
    fn test_base_url_retains_origin_only() {
        let client = PermaClient::builder()
            .base_url("https://api.perma.test:8000/some/path?x=1")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://api.perma.test:8000/");
    }

    #[test]
    fn test_rejects_malformed_base_urls() {
        for base_url in ["api.perma.cc", "", "not a url", "data:text/plain,hi"] {
            let result = PermaClient::builder().base_url(base_url).build();
            assert!(
                matches!(result, Err(PermaError::InvalidBaseUrl(_))),
                "accepted {base_url:?}"
            );
        }
    }

    #[test]
    fn test_builder_with_all_options() {
        let client = PermaClient::builder()
            .api_key(DUMMY_API_KEY)
            .base_url("https://api.perma.test:8000")
            .throttle(Duration::from_millis(500))
            .safe_delete_poll_interval(Duration::from_millis(1))
            .safe_delete_max_attempts(3)
            .build()
            .unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.safe_delete_max_attempts(), 3);
        assert_eq!(
            client.safe_delete_poll_interval(),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn test_authorization_header_format() {
        let client = PermaClient::new(DUMMY_API_KEY).unwrap();
        assert_eq!(
            client.authorization().unwrap(),
            format!("ApiKey {DUMMY_API_KEY}")
        );
    }

    #[test]
    fn test_authorization_fails_closed_without_key() {
        let client = PermaClient::anonymous().unwrap();
        assert!(matches!(
            client.authorization(),
            Err(PermaError::AuthRequired)
        ));
    }
}
