//! Monotonic request tokens for rejecting stale responses.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out increasing tokens; only the latest one is current.
///
/// There is no request cancellation. A superseded request is left to finish
/// and its completion is dropped because its token is no longer current
/// ("last relevant response wins", not "last response wins").
///
/// Cheap to clone; clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct Sequencer {
    current: Arc<AtomicU64>,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new token, making every earlier one stale.
    pub fn next(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Make every issued token stale without starting a new request.
    pub fn invalidate(&self) -> u64 {
        self.next()
    }

    /// The latest token.
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    /// Check whether a completion carrying `token` may still apply.
    pub fn is_current(&self, token: u64) -> bool {
        self.current() == token
    }
}
