//! Cancellable delayed tasks.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

/// Runs a closure once input has been quiet for a delay.
///
/// Each [`Debouncer::schedule`] aborts the previously armed timer, so a burst
/// of calls closer together than the delay fires only the last closure. The
/// generation check covers a timer that already woke up when it was replaced.
#[derive(Debug, Clone)]
pub struct Debouncer {
    runtime: Handle,
    slot: Arc<Mutex<Slot>>,
}

impl Debouncer {
    /// Create a debouncer that spawns its timers on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Create a debouncer on the current runtime, if there is one.
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// The runtime timers are spawned on.
    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// Arm the timer, replacing any pending one.
    pub fn schedule<F>(&self, delay: Duration, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        if let Some(previous) = slot.handle.take() {
            previous.abort();
        }

        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        slot.handle = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let fire = {
                let mut slot = lock(&shared);
                if slot.generation == generation {
                    slot.handle = None;
                    true
                } else {
                    false
                }
            };
            if fire {
                f();
            }
        }));
    }

    /// Disarm the pending timer. Returns `true` if one was armed.
    pub fn cancel(&self) -> bool {
        let mut slot = lock(&self.slot);
        slot.generation += 1;
        match slot.handle.take() {
            Some(handle) => {
                let armed = !handle.is_finished();
                handle.abort();
                armed
            }
            None => false,
        }
    }

    /// Check whether a timer is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        lock(&self.slot)
            .handle
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
