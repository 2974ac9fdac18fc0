//! Username availability.

use async_trait::async_trait;
use fieldcheck::error::RemoteCheckFailure;
use fieldcheck::field::{RemoteCheck, RemoteVerdict};
use serde::Deserialize;

use crate::client::SkillStackClient;
use crate::error::Error;

/// Shown when the server reports the username as registered.
pub const USERNAME_TAKEN: &str = "This username is already taken.";

#[derive(Debug, Deserialize)]
struct UsernameResponse {
    #[serde(default)]
    taken: bool,
}

impl SkillStackClient {
    /// Whether `username` is already registered.
    pub async fn check_username(&self, username: &str) -> Result<bool, Error> {
        let mut url = self.url(&self.endpoints().check_username)?;
        url.query_pairs_mut().append_pair("username", username);
        let body: UsernameResponse = self.get_json(url).await?;
        Ok(body.taken)
    }
}

/// The username endpoint as a [`RemoteCheck`] for the registration form.
///
/// ```ignore
/// let username = AsyncFieldValidator::attach(
///     FieldConfig::new("username")
///         .min_local_length(3, "Username must be at least 3 characters.")
///         .remote_check(UsernameCheck::new(client.clone())),
/// )?;
/// ```
#[derive(Clone)]
pub struct UsernameCheck {
    client: SkillStackClient,
    message: String,
}

impl UsernameCheck {
    pub fn new(client: SkillStackClient) -> Self {
        Self {
            client,
            message: USERNAME_TAKEN.to_string(),
        }
    }

    /// Override the message shown for a taken username.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

#[async_trait]
impl RemoteCheck for UsernameCheck {
    async fn check(&self, value: &str) -> Result<RemoteVerdict, RemoteCheckFailure> {
        if self.client.check_username(value).await? {
            Ok(RemoteVerdict::rejected(self.message.clone()))
        } else {
            Ok(RemoteVerdict::accepted())
        }
    }
}
