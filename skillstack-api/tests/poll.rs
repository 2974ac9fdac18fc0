use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use skillstack_api::error::{ApiError, Error};
use skillstack_api::poll::{PollConfig, UnreadPoller, UnreadSource};

type Script = dyn Fn(usize) -> (u64, Option<u64>) + Send + Sync;

/// Answers call `n` with `script(n)`: a latency in ms and a count, or `None`
/// for a server error.
#[derive(Clone)]
struct Scripted {
    calls: Arc<AtomicUsize>,
    script: Arc<Script>,
}

impl Scripted {
    fn new(script: impl Fn(usize) -> (u64, Option<u64>) + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::default(),
            script: Arc::new(script),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UnreadSource for Scripted {
    async fn unread_count(&self) -> Result<u64, Error> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let (latency, reply) = (self.script)(n);
        tokio::time::sleep(Duration::from_millis(latency)).await;
        reply.ok_or_else(|| ApiError::http(503, "unavailable").into())
    }
}

async fn wait(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_fetches_on_start_and_every_interval() {
    let source = Scripted::new(|n| (0, Some(n as u64 + 1)));
    let poller = UnreadPoller::new(source.clone());
    let task = poller.spawn();

    wait(10).await;
    assert_eq!(poller.count().ready(), Some(1));
    assert_eq!(poller.badge().text, "1");

    wait(30_000).await;
    assert_eq!(source.calls(), 2);
    assert_eq!(poller.count().ready(), Some(2));

    poller.stop();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_refreshes_when_page_becomes_visible() {
    let source = Scripted::new(|_| (0, Some(3)));
    let poller = UnreadPoller::new(source.clone());
    let _task = poller.spawn();

    wait(10).await;
    assert_eq!(source.calls(), 1);

    poller.on_visibility_change(false);
    wait(10).await;
    assert_eq!(source.calls(), 1);

    poller.on_visibility_change(true);
    wait(10).await;
    assert_eq!(source.calls(), 2);

    poller.on_page_show(false);
    wait(10).await;
    assert_eq!(source.calls(), 2);

    poller.on_page_show(true);
    wait(10).await;
    assert_eq!(source.calls(), 3);
    poller.stop();
}

#[tokio::test(start_paused = true)]
async fn test_failure_keeps_last_count() {
    let source = Scripted::new(|n| (0, (n == 0).then_some(5)));
    let poller = UnreadPoller::new(source.clone())
        .with_config(PollConfig::new().interval(Duration::from_secs(10)));
    let _task = poller.spawn();

    wait(25_000).await;
    assert_eq!(source.calls(), 3);
    assert_eq!(poller.count().ready(), Some(5));
    assert!(poller.badge().visible);
    poller.stop();
}

#[tokio::test(start_paused = true)]
async fn test_slow_response_never_overwrites_newer_count() {
    // First fetch is slow and reports an older count.
    let source = Scripted::new(|n| if n == 0 { (10_000, Some(1)) } else { (0, Some(7)) });
    let poller = UnreadPoller::new(source.clone());
    let _task = poller.spawn();

    wait(1_000).await;
    poller.refresh();
    wait(100).await;
    assert_eq!(poller.count().ready(), Some(7));

    wait(20_000).await;
    assert_eq!(poller.count().ready(), Some(7));
    poller.stop();
}

#[tokio::test(start_paused = true)]
async fn test_zero_hides_badge() {
    let source = Scripted::new(|_| (0, Some(0)));
    let poller = UnreadPoller::new(source);
    let _task = poller.spawn();

    wait(10).await;
    assert!(!poller.badge().visible);
    poller.stop();
}

#[tokio::test(start_paused = true)]
async fn test_stop_ends_polling() {
    let source = Scripted::new(|_| (0, Some(1)));
    let poller = UnreadPoller::new(source.clone());
    let task = poller.spawn();

    wait(10).await;
    poller.stop();
    task.await.unwrap();

    wait(120_000).await;
    assert_eq!(source.calls(), 1);
}

/// Never answers; counts how many fetches are still alive.
#[derive(Clone, Default)]
struct Hanging {
    calls: Arc<AtomicUsize>,
    alive: Arc<AtomicUsize>,
}

struct Alive(Arc<AtomicUsize>);

impl Drop for Alive {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UnreadSource for Hanging {
    async fn unread_count(&self) -> Result<u64, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.alive.fetch_add(1, Ordering::SeqCst);
        let _alive = Alive(Arc::clone(&self.alive));
        std::future::pending::<()>().await;
        Ok(0)
    }
}

#[tokio::test(start_paused = true)]
async fn test_hung_fetches_do_not_pile_up() {
    let source = Hanging::default();
    let poller = UnreadPoller::new(source.clone())
        .with_config(PollConfig::new().interval(Duration::from_secs(1)));
    let task = poller.spawn();

    wait(10_500).await;
    poller.refresh();
    wait(10).await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 12);
    assert_eq!(source.alive.load(Ordering::SeqCst), 1);
    assert!(poller.count().get().is_idle());

    poller.stop();
    task.await.unwrap();
    wait(10).await;
    assert_eq!(source.alive.load(Ordering::SeqCst), 0);
}
