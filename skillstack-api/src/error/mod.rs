//! Error types

mod api;

pub use api::*;

use fieldcheck::error::RemoteCheckFailure;

/// Top-level error for the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A request failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The client could not be configured.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns the API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::Config(_) => None,
        }
    }
}

impl From<Error> for RemoteCheckFailure {
    fn from(err: Error) -> Self {
        match err {
            Error::Api(ApiError::Http { status, .. }) => Self::Status(status),
            Error::Api(ApiError::Parse { message, .. }) => Self::Malformed(message),
            other => Self::Transport(other.to_string()),
        }
    }
}
