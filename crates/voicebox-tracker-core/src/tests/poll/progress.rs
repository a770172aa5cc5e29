#![allow(clippy::unwrap_used)]

use crate::{
    TrackerError,
    poll::{ProgressPoller, ProgressTracker},
    tasks::{ActiveTasksSnapshot, ProcessingStage, ProcessingStatus},
    tests::fixtures::{
        Scripted, ScriptedTaskSource, processing, snapshot_with_processing, wait_for,
    },
};

use std::{panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;

const INTERVAL: Duration = Duration::from_millis(700);

fn fetch_failed() -> TrackerError {
    TrackerError::TaskFetchFailed {
        reason: "timed out".to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// WHAT: Not found before first sighting keeps polling
/// WHY: The backend may not have started the task yet
#[test]
fn given_unseen_task_when_not_found_then_none_and_still_polling() {
    // Given: A fresh tracker
    let mut tracker = ProgressTracker::new("r1");

    // When: The task is not listed
    let state = tracker.observe(Ok(None));

    // Then: No task, still polling
    assert_eq!(state.task, None);
    assert!(state.is_polling);
    assert!(!tracker.has_seen());
}

/// WHAT: Not found after a sighting stops polling
/// WHY: A task that was seen and vanished has finished
#[test]
fn given_seen_task_when_not_found_then_none_and_stopped() {
    // Given: The task was seen once
    let mut tracker = ProgressTracker::new("r1");
    tracker.observe(Ok(Some(processing("r1", ProcessingStage::Upload, 5.0))));

    // When: It is no longer listed
    let state = tracker.observe(Ok(None));

    // Then: Cleared and stopped
    assert_eq!(state.task, None);
    assert!(!state.is_polling);
}

/// WHAT: Outcomes after stopping are ignored
/// WHY: No tick may mutate state once the task finished
#[test]
fn given_stopped_tracker_when_observing_then_state_frozen() {
    let mut tracker = ProgressTracker::new("r1");
    tracker.observe(Ok(Some(processing("r1", ProcessingStage::Upload, 5.0))));
    let stopped = tracker.observe(Ok(None));

    let after = tracker.observe(Ok(Some(processing("r1", ProcessingStage::Save, 90.0))));

    assert_eq!(after, stopped);
}

/// WHAT: A failed fetch keeps the last known task
/// WHY: Transient network errors must not flicker the view
#[test]
fn given_seen_task_when_fetch_fails_then_last_task_kept() {
    let mut tracker = ProgressTracker::new("r1");
    let task = processing("r1", ProcessingStage::Transcribe, 40.0);
    tracker.observe(Ok(Some(task.clone())));

    let state = tracker.observe(Err(fetch_failed()));

    assert_eq!(state.task, Some(task));
    assert!(state.is_polling);
}

/// WHAT: A stage regression is still applied
/// WHY: The backend is the source of truth for the current stage
#[test]
fn given_later_stage_when_earlier_stage_reported_then_latest_record_kept() {
    let mut tracker = ProgressTracker::new("r1");
    tracker.observe(Ok(Some(processing("r1", ProcessingStage::Embed, 70.0))));

    let mut regressed = processing("r1", ProcessingStage::Validate, 20.0);
    regressed.status = ProcessingStatus::Running;
    let state = tracker.observe(Ok(Some(regressed.clone())));

    assert_eq!(state.task, Some(regressed));
}

/// WHAT: The poller stops after a seen task disappears
/// WHY: Finished tasks must not keep generating requests
#[tokio::test(start_paused = true)]
async fn given_task_seen_then_gone_when_polling_then_poller_stops() {
    // Given: Not started, then running, then gone
    let source = Arc::new(ScriptedTaskSource::new(vec![
        Scripted::Snapshot(ActiveTasksSnapshot::default()),
        Scripted::Snapshot(snapshot_with_processing(vec![processing(
            "r1",
            ProcessingStage::Upload,
            10.0,
        )])),
        Scripted::Snapshot(ActiveTasksSnapshot::default()),
    ]));

    // When: Polling until it stops
    let (handle, mut state) = ProgressPoller::start(Arc::clone(&source), "r1", INTERVAL);
    wait_for(&mut state, |s| !s.is_polling).await;
    tokio::time::sleep(INTERVAL * 5).await;

    // Then: Exactly three fetches, loop finished, task cleared
    assert_eq!(source.calls(), 3);
    assert!(handle.is_finished());
    assert_eq!(state.borrow().task, None);
}

/// WHAT: The poller keeps going while the task has not appeared
/// WHY: Not yet started is not the same as finished
#[tokio::test(start_paused = true)]
async fn given_task_never_listed_when_polling_then_keeps_polling() {
    let source = Arc::new(ScriptedTaskSource::new(vec![Scripted::Snapshot(
        ActiveTasksSnapshot::default(),
    )]));

    let (handle, state) = ProgressPoller::start(Arc::clone(&source), "r1", INTERVAL);
    tokio::time::sleep(INTERVAL * 4 + Duration::from_millis(100)).await;

    assert!(source.calls() >= 4);
    assert!(state.borrow().is_polling);
    assert!(!handle.is_finished());
    handle.join().await;
}

/// WHAT: Fetch failures keep the last task while polling continues
/// WHY: Transport errors are absorbed by the poller
#[tokio::test(start_paused = true)]
async fn given_failing_fetches_when_polling_then_last_task_kept() {
    // Given: One good response, then failures
    let task = processing("r1", ProcessingStage::Transcribe, 40.0);
    let source = Arc::new(ScriptedTaskSource::new(vec![
        Scripted::Snapshot(snapshot_with_processing(vec![task.clone()])),
        Scripted::Fail,
    ]));

    // When: Polling through several failures
    let (handle, mut state) = ProgressPoller::start(Arc::clone(&source), "r1", INTERVAL);
    wait_for(&mut state, |s| s.task.is_some()).await;
    tokio::time::sleep(INTERVAL * 3 + Duration::from_millis(100)).await;

    // Then: Still showing the task and still polling
    assert!(source.calls() >= 4);
    assert_eq!(state.borrow().task, Some(task));
    assert!(state.borrow().is_polling);
    handle.join().await;
}
