use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use fieldcheck::debounce::Debouncer;
use fieldcheck::resource::{Resource, ResourceState};
use fieldcheck::sequence::Sequencer;

#[tokio::test(start_paused = true)]
async fn test_only_last_schedule_fires() {
    let debouncer = Debouncer::try_current().unwrap();
    let fired = Arc::new(AtomicUsize::new(0));

    for i in 1..=5 {
        let fired = Arc::clone(&fired);
        debouncer.schedule(Duration::from_millis(100), move || {
            fired.store(i, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(debouncer.is_pending());
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 5);
    assert!(!debouncer.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_disarms() {
    let debouncer = Debouncer::try_current().unwrap();
    let fired = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&fired);
    debouncer.schedule(Duration::from_millis(100), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    assert!(debouncer.cancel());
    assert!(!debouncer.cancel());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[test]
fn test_no_runtime() {
    assert!(Debouncer::try_current().is_none());
}

#[test]
fn test_sequencer() {
    let seq = Sequencer::new();
    let first = seq.next();
    let second = seq.next();
    assert!(second > first);
    assert!(!seq.is_current(first));
    assert!(seq.is_current(second));

    seq.invalidate();
    assert!(!seq.is_current(second));

    let shared = seq.clone();
    let third = shared.next();
    assert!(seq.is_current(third));
}

#[test]
fn test_resource_states() {
    let resource: Resource<u64> = Resource::new();
    assert!(resource.get().is_idle());

    resource.set_loading();
    assert!(resource.is_loading());
    assert!(resource.is_dirty());
    resource.clear_dirty();

    resource.set_ready(7);
    assert_eq!(resource.ready(), Some(7));
    assert_eq!(resource.get().map(|n| n * 2).as_ready(), Some(&14));

    resource.set_error("offline");
    match resource.get() {
        ResourceState::Error(e) => assert_eq!(e.message, "offline"),
        other => panic!("expected error, got {other:?}"),
    }
}

#[test]
fn test_set_if_checks_token_at_write_time() {
    let resource: Resource<u64> = Resource::new();
    let sequencer = Sequencer::new();
    let old = sequencer.next();
    let new = sequencer.next();

    assert!(resource.set_if(|_| sequencer.is_current(new), ResourceState::Ready(2)));
    assert!(!resource.set_if(|_| sequencer.is_current(old), ResourceState::Ready(1)));
    assert_eq!(resource.ready(), Some(2));

    resource.set_loading();
    assert!(resource.set_if(ResourceState::is_loading, ResourceState::Idle));
    assert!(!resource.set_if(ResourceState::is_loading, ResourceState::Idle));
    assert!(resource.get().is_idle());
}

#[test]
fn test_concurrent_completions_keep_latest_token() {
    let resource: Resource<u64> = Resource::new();
    let sequencer = Sequencer::new();

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..500 {
                    let token = sequencer.next();
                    resource.set_if(|_| sequencer.is_current(token), ResourceState::Ready(token));
                }
            });
        }
    });

    assert_eq!(resource.ready(), Some(sequencer.current()));
}
