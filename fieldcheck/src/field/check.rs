//! The remote source of truth a field is confirmed against.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::RemoteCheckFailure;

/// What the server said about a candidate value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteVerdict {
    /// Whether the value is acceptable.
    pub valid: bool,
    /// Message to render when the value is rejected.
    pub message: Option<String>,
}

impl RemoteVerdict {
    /// The value is acceptable.
    pub fn accepted() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// The value is not acceptable, with a message for the user.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

/// Asks a remote source of truth whether a value is acceptable.
///
/// Implementations are called repeatedly while the user types, so the
/// underlying endpoint must be idempotent and free of side effects.
#[async_trait]
pub trait RemoteCheck: Send + Sync {
    async fn check(&self, value: &str) -> Result<RemoteVerdict, RemoteCheckFailure>;
}

/// Adapts an async closure into a [`RemoteCheck`].
pub struct FnCheck<F> {
    f: F,
}

#[async_trait]
impl<F, Fut> RemoteCheck for FnCheck<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<RemoteVerdict, RemoteCheckFailure>> + Send + 'static,
{
    async fn check(&self, value: &str) -> Result<RemoteVerdict, RemoteCheckFailure> {
        (self.f)(value.to_string()).await
    }
}

/// Wrap an async closure as a shareable remote check.
///
/// ```ignore
/// let check = check_fn(|value: String| async move {
///     Ok(if value == "admin" {
///         RemoteVerdict::rejected("This username is already taken.")
///     } else {
///         RemoteVerdict::accepted()
///     })
/// });
/// ```
pub fn check_fn<F, Fut>(f: F) -> Arc<dyn RemoteCheck>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<RemoteVerdict, RemoteCheckFailure>> + Send + 'static,
{
    Arc::new(FnCheck { f })
}
