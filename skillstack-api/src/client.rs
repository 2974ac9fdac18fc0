//! Main SkillStackClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Endpoints;
use crate::error::{ApiError, Error};

/// Header every page script sends so Django's `is_ajax` checks pass.
pub const REQUESTED_WITH_HEADER: &str = "X-Requested-With";
const REQUESTED_WITH_VALUE: &str = "XMLHttpRequest";
/// Header Django's CSRF middleware reads on unsafe methods.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// The client for the SkillStack JSON endpoints.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads and tasks.
///
/// # Example
///
/// ```ignore
/// use skillstack_api::SkillStackClient;
///
/// let client = SkillStackClient::builder()
///     .url("https://skillstack.example")
///     .csrf_token(token)
///     .timeout(Duration::from_secs(10))
///     .build()?;
///
/// let taken = client.check_username("admin").await?;
/// ```
#[derive(Clone)]
pub struct SkillStackClient {
    inner: Arc<SkillStackClientInner>,
}

struct SkillStackClientInner {
    base_url: Url,
    endpoints: Endpoints,
    csrf_token: Option<String>,
    session: Option<String>,
    http_client: Client,
    timeout: Option<Duration>,
}

impl SkillStackClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> SkillStackClientBuilder<Missing> {
        SkillStackClientBuilder::new()
    }

    /// Returns the base URL of the site.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Returns the endpoint paths in use.
    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    /// Resolves an endpoint path against the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// GET `url` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        log::trace!("GET {url}");
        let request = self.prepare(self.inner.http_client.get(url));
        let response = request.send().await.map_err(|e| self.send_error(e))?;
        let response = check_status(response).await?;

        let body = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&body).map_err(|e| ApiError::parse_with_body(e.to_string(), body).into())
    }

    /// POST `body` as JSON to `url`, with the CSRF token. The response body is
    /// ignored.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(&self, url: Url, body: &B) -> Result<(), Error> {
        log::trace!("POST {url}");
        let mut request = self.prepare(self.inner.http_client.post(url)).json(body);
        if let Some(token) = &self.inner.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }
        let response = request.send().await.map_err(|e| self.send_error(e))?;
        check_status(response).await?;
        Ok(())
    }

    fn prepare(&self, mut request: RequestBuilder) -> RequestBuilder {
        request = request.header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE);
        if let Some(cookie) = self.cookie_header() {
            request = request.header(COOKIE, cookie);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    fn cookie_header(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(session) = &self.inner.session {
            parts.push(format!("sessionid={session}"));
        }
        if let Some(token) = &self.inner.csrf_token {
            parts.push(format!("csrftoken={token}"));
        }
        (!parts.is_empty()).then(|| parts.join("; "))
    }

    fn send_error(&self, err: reqwest::Error) -> ApiError {
        match self.inner.timeout {
            Some(timeout) if err.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::Network(err),
        }
    }
}

async fn check_status(response: Response) -> Result<Response, Error> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::http(status, body).into())
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`SkillStackClient`].
///
/// Uses the typestate pattern to ensure the site URL is set at compile time.
///
/// # Example
///
/// ```ignore
/// let client = SkillStackClient::builder()
///     .url("http://127.0.0.1:8000")
///     .session(session_id)
///     .endpoints(Endpoints::default().unread("/inbox/unread/"))
///     .build()?;
/// ```
pub struct SkillStackClientBuilder<U> {
    url: U,
    endpoints: Endpoints,
    csrf_token: Option<String>,
    session: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl SkillStackClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            endpoints: Endpoints::default(),
            csrf_token: None,
            session: None,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the site URL.
    pub fn url(self, url: impl Into<String>) -> SkillStackClientBuilder<Set<String>> {
        SkillStackClientBuilder {
            url: Set(url.into()),
            endpoints: self.endpoints,
            csrf_token: self.csrf_token,
            session: self.session,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for SkillStackClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> SkillStackClientBuilder<U> {
    /// Overrides the endpoint paths.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the CSRF token sent with POST requests.
    pub fn csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Sets the session cookie for endpoints that need a logged-in user.
    pub fn session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl SkillStackClientBuilder<Set<String>> {
    /// Builds the [`SkillStackClient`].
    ///
    /// Fails if the URL does not parse or the HTTP client cannot be created.
    pub fn build(self) -> Result<SkillStackClient, Error> {
        let base_url = Url::parse(&self.url.0).map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.url.0)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        Ok(SkillStackClient {
            inner: Arc::new(SkillStackClientInner {
                base_url,
                endpoints: self.endpoints,
                csrf_token: self.csrf_token,
                session: self.session,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}
