use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Error type for resource loading failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ResourceError {
    /// Error message
    pub message: String,
}

impl ResourceError {
    /// Create a new resource error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for ResourceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ResourceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// The state of a value fetched from the server.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResourceState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// The value arrived
    Ready(T),
    /// The request failed
    Error(ResourceError),
}

impl<T> ResourceState<T> {
    /// Check if resource is idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if resource is loading
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if resource is ready
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Check if resource errored
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Get reference to ready value
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// Get the error if present
    pub fn as_error(&self) -> Option<&ResourceError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Map the ready value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ResourceState<U> {
        match self {
            Self::Idle => ResourceState::Idle,
            Self::Loading => ResourceState::Loading,
            Self::Ready(v) => ResourceState::Ready(f(v)),
            Self::Error(e) => ResourceState::Error(e),
        }
    }
}

/// Server-fetched value with interior mutability.
///
/// `Resource<T>` wraps a `ResourceState<T>` behind `Arc<RwLock<_>>`, so it is
/// cheap to clone and can be written from the task that completes a request
/// while the page reads it. The dirty flag tells the page to re-render.
///
/// # Example
///
/// ```ignore
/// let preview: Resource<LinkPreview> = Resource::new();
/// preview.set_loading();
///
/// match client.link_preview(&url).await {
///     Ok(p) => preview.set_ready(p),
///     Err(e) => preview.set_error(e.to_string()),
/// }
/// ```
#[derive(Debug)]
pub struct Resource<T> {
    inner: Arc<RwLock<ResourceState<T>>>,
    dirty: Arc<AtomicBool>,
}

impl<T> Resource<T> {
    /// Create a new resource in idle state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ResourceState::Idle)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the current state
    pub fn get(&self) -> ResourceState<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(ResourceState::Idle)
    }

    /// Get a clone of the ready value, if any
    pub fn ready(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ready().cloned())
    }

    fn replace(&self, state: ResourceState<T>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = state;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Replace the state only if `keep` still holds once the write lock is
    /// taken. Returns whether the state was replaced.
    ///
    /// Completions pass their staleness check here so that a newer result
    /// cannot land between the check and the write.
    pub fn set_if<F>(&self, keep: F, state: ResourceState<T>) -> bool
    where
        F: FnOnce(&ResourceState<T>) -> bool,
    {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        if !keep(&guard) {
            return false;
        }
        *guard = state;
        self.dirty.store(true, Ordering::SeqCst);
        true
    }

    /// Set to idle state
    pub fn set_idle(&self) {
        self.replace(ResourceState::Idle);
    }

    /// Set to loading state
    pub fn set_loading(&self) {
        self.replace(ResourceState::Loading);
    }

    /// Set to ready state with value
    pub fn set_ready(&self, value: T) {
        self.replace(ResourceState::Ready(value));
    }

    /// Set to error state
    pub fn set_error(&self, err: impl Into<ResourceError>) {
        self.replace(ResourceState::Error(err.into()));
    }

    /// Check if the resource has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Check if resource is loading
    pub fn is_loading(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_loading())
            .unwrap_or(false)
    }

    /// Check if resource is ready
    pub fn is_ready(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_ready())
            .unwrap_or(false)
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
