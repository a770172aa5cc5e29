use crate::poll::PollHandle;

use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

fn counting_loop(ticks: Arc<AtomicUsize>) -> PollHandle {
    PollHandle::spawn("counter", move |mut shutdown| async move {
        let mut ticker = tokio::time::interval(Duration::from_millis(100));
        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = ticker.tick() => {
                    ticks.fetch_add(1, Ordering::SeqCst);
                }
            }
        }
    })
}

/// WHAT: Join stops a loop that watches the shutdown signal
/// WHY: Teardown must leave no running timers
#[tokio::test(start_paused = true)]
async fn given_running_loop_when_joining_then_loop_stops() {
    // Given: A ticking loop
    let ticks = Arc::new(AtomicUsize::new(0));
    let handle = counting_loop(Arc::clone(&ticks));
    tokio::time::sleep(Duration::from_millis(350)).await;
    assert!(ticks.load(Ordering::SeqCst) >= 3);

    // When: Joining
    handle.join().await;
    let after_join = ticks.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(1)).await;

    // Then: No more ticks
    assert_eq!(ticks.load(Ordering::SeqCst), after_join);
}

/// WHAT: Cancel stops the loop and reports it finished
/// WHY: Cancellation must be immediate and observable
#[tokio::test(start_paused = true)]
async fn given_running_loop_when_cancelling_then_finished_and_silent() {
    // Given: A ticking loop
    let ticks = Arc::new(AtomicUsize::new(0));
    let mut handle = counting_loop(Arc::clone(&ticks));
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(!handle.is_finished());

    // When: Cancelling
    handle.cancel();
    let after_cancel = ticks.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(1)).await;

    // Then: Finished, no more ticks, cancel is repeatable
    assert!(handle.is_finished());
    assert_eq!(ticks.load(Ordering::SeqCst), after_cancel);
    handle.cancel();
    assert_eq!(handle.name(), "counter");
}

/// WHAT: Dropping the handle stops the loop
/// WHY: A loop must never outlive its owner
#[tokio::test(start_paused = true)]
async fn given_running_loop_when_handle_dropped_then_loop_stops() {
    let ticks = Arc::new(AtomicUsize::new(0));
    let handle = counting_loop(Arc::clone(&ticks));
    tokio::time::sleep(Duration::from_millis(150)).await;

    drop(handle);
    tokio::task::yield_now().await;
    let after_drop = ticks.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(ticks.load(Ordering::SeqCst), after_drop);
}

/// WHAT: Join aborts a loop that ignores shutdown
/// WHY: A stuck loop must not hang teardown
#[tokio::test(start_paused = true)]
async fn given_loop_ignoring_shutdown_when_joining_then_aborted() {
    // Given: A loop that never looks at its shutdown signal
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&ticks);
    let handle = PollHandle::spawn("stubborn", move |_shutdown| async move {
        loop {
            tokio::time::sleep(Duration::from_millis(100)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    // When: Joining
    handle.join().await;
    let after_join = ticks.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(1)).await;

    // Then: Aborted after the grace period
    assert!(after_join >= 9);
    assert_eq!(ticks.load(Ordering::SeqCst), after_join);
}
