//! Endpoint paths and environment configuration.

use std::env;
use std::time::Duration;

use crate::client::SkillStackClient;
use crate::error::Error;

/// Environment variable holding the site URL.
pub const URL_VAR: &str = "SKILLSTACK_URL";
/// Environment variable holding the CSRF token.
pub const CSRF_TOKEN_VAR: &str = "SKILLSTACK_CSRF_TOKEN";
/// Environment variable holding the session cookie value.
pub const SESSION_VAR: &str = "SKILLSTACK_SESSION";

/// Paths of the JSON endpoints, relative to the site URL.
///
/// `mark_read` and `status_update` are templates: `{id}` is replaced with the
/// message or project ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// `GET ?username=` → `{"taken": bool}`
    ///
    /// Default: `/users/check-username/`
    pub check_username: String,

    /// `GET ?url=` → `{"title": str?, "image_url": str?}`
    ///
    /// Default: `/portfolio/preview/`
    pub preview: String,

    /// `GET` → `{"unread": int}`
    ///
    /// Default: `/messaging/unread-count/`
    pub unread: String,

    /// `POST {"id": ...}`
    ///
    /// Default: `/messaging/{id}/read/`
    pub mark_read: String,

    /// `POST {"status": ...}`
    ///
    /// Default: `/projects/{id}/status/`
    pub status_update: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            check_username: "/users/check-username/".to_string(),
            preview: "/portfolio/preview/".to_string(),
            unread: "/messaging/unread-count/".to_string(),
            mark_read: "/messaging/{id}/read/".to_string(),
            status_update: "/projects/{id}/status/".to_string(),
        }
    }
}

impl Endpoints {
    /// Sets the username check path.
    pub fn check_username(mut self, path: impl Into<String>) -> Self {
        self.check_username = path.into();
        self
    }

    /// Sets the link preview path.
    pub fn preview(mut self, path: impl Into<String>) -> Self {
        self.preview = path.into();
        self
    }

    /// Sets the unread count path.
    pub fn unread(mut self, path: impl Into<String>) -> Self {
        self.unread = path.into();
        self
    }

    /// Sets the mark-as-read path template.
    pub fn mark_read(mut self, path: impl Into<String>) -> Self {
        self.mark_read = path.into();
        self
    }

    /// Sets the status update path template.
    pub fn status_update(mut self, path: impl Into<String>) -> Self {
        self.status_update = path.into();
        self
    }
}

/// Fill `{id}` in a path template.
pub(crate) fn with_id(template: &str, id: &str) -> String {
    template.replace("{id}", &urlencoding::encode(id))
}

/// Everything needed to build a [`SkillStackClient`], usually read from the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub url: Option<String>,
    pub csrf_token: Option<String>,
    pub session: Option<String>,
    pub timeout: Option<Duration>,
    pub endpoints: Endpoints,
}

impl ClientConfig {
    /// Read [`URL_VAR`], [`CSRF_TOKEN_VAR`] and [`SESSION_VAR`].
    ///
    /// Empty values count as unset. Load a `.env` file first if one is used.
    pub fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            url: var(URL_VAR),
            csrf_token: var(CSRF_TOKEN_VAR),
            session: var(SESSION_VAR),
            ..Default::default()
        }
    }

    /// Sets the site URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a client from this config. Fails if no URL is set.
    pub fn build_client(&self) -> Result<SkillStackClient, Error> {
        let url = self
            .url
            .clone()
            .ok_or_else(|| Error::config(format!("{URL_VAR} is not set")))?;

        let mut builder = SkillStackClient::builder()
            .url(url)
            .endpoints(self.endpoints.clone());
        if let Some(token) = &self.csrf_token {
            builder = builder.csrf_token(token);
        }
        if let Some(session) = &self.session {
            builder = builder.session(session);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}
