//! Unread-message polling for the inbox badges.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use fieldcheck::resource::{Resource, ResourceState};
use fieldcheck::sequence::Sequencer;
use fieldcheck::view::{Badge, unread_badge};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::client::SkillStackClient;
use crate::error::Error;

/// Where the unread count comes from.
#[async_trait]
pub trait UnreadSource: Send + Sync {
    async fn unread_count(&self) -> Result<u64, Error>;
}

#[async_trait]
impl UnreadSource for SkillStackClient {
    async fn unread_count(&self) -> Result<u64, Error> {
        SkillStackClient::unread_count(self).await
    }
}

/// Polling configuration.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Time between refreshes.
    ///
    /// Default: 30 s
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
        }
    }
}

impl PollConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the refresh interval.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Keeps the unread count fresh.
///
/// Fetches once on start, then on every interval tick and whenever the page
/// becomes visible again. Failed fetches leave the last count in place. Each
/// fetch carries a sequence token, so a slow response can never overwrite a
/// newer count, and at most one fetch runs at a time.
///
/// # Example
///
/// ```ignore
/// let poller = UnreadPoller::new(client.clone());
/// let task = poller.spawn();
///
/// // page becomes visible again
/// poller.on_visibility_change(true);
///
/// render(poller.badge());
/// poller.stop();
/// ```
#[derive(Clone)]
pub struct UnreadPoller {
    source: Arc<dyn UnreadSource>,
    config: PollConfig,
    count: Resource<u64>,
    sequencer: Sequencer,
    wake: Arc<Notify>,
    cancel: CancellationToken,
    /// The fetch still running, aborted when the next one starts.
    in_flight: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl UnreadPoller {
    pub fn new(source: impl UnreadSource + 'static) -> Self {
        Self::from_arc(Arc::new(source))
    }

    pub fn from_arc(source: Arc<dyn UnreadSource>) -> Self {
        Self {
            source,
            config: PollConfig::default(),
            count: Resource::new(),
            sequencer: Sequencer::new(),
            wake: Arc::new(Notify::new()),
            cancel: CancellationToken::new(),
            in_flight: Arc::default(),
        }
    }

    /// Replace the polling config.
    pub fn with_config(mut self, config: PollConfig) -> Self {
        self.config = config;
        self
    }

    /// The latest unread count.
    pub fn count(&self) -> &Resource<u64> {
        &self.count
    }

    /// Badge for the navbar and the inbox header.
    pub fn badge(&self) -> Badge {
        unread_badge(self.count.ready().unwrap_or(0))
    }

    /// Refresh immediately.
    pub fn refresh(&self) {
        self.wake.notify_one();
    }

    /// The page's visibility changed. Refreshes when it becomes visible.
    pub fn on_visibility_change(&self, visible: bool) {
        if visible {
            self.refresh();
        }
    }

    /// The page was shown. Refreshes when it was restored from the
    /// back-forward cache, where timers were frozen.
    pub fn on_page_show(&self, persisted: bool) {
        if persisted {
            self.refresh();
        }
    }

    /// Stop polling and drop in-flight fetches.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Run the polling loop on the current runtime.
    pub fn spawn(&self) -> JoinHandle<()> {
        tokio::spawn(self.clone().run())
    }

    /// The polling loop. Returns after [`UnreadPoller::stop`].
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = ticker.tick() => {}
                _ = self.wake.notified() => {}
            }
            self.fetch();
        }
        log::debug!("unread poller stopped");
    }

    fn fetch(&self) {
        let token = self.sequencer.next();
        let source = Arc::clone(&self.source);
        let count = self.count.clone();
        let sequencer = self.sequencer.clone();
        let cancel = self.cancel.clone();

        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = in_flight.take()
            && !previous.is_finished()
        {
            log::trace!("aborting unread fetch superseded by token {token}");
            previous.abort();
        }

        *in_flight = Some(tokio::spawn(async move {
            let result = tokio::select! {
                _ = cancel.cancelled() => return,
                result = source.unread_count() => result,
            };
            match result {
                Ok(n) => {
                    if !count.set_if(|_| sequencer.is_current(token), ResourceState::Ready(n)) {
                        log::trace!("dropping stale unread count {n} (token {token})");
                    }
                }
                Err(e) => log::debug!("unread refresh failed: {e}"),
            }
        }));
    }
}
