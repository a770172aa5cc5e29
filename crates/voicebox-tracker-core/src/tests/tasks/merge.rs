#![allow(clippy::unwrap_used)]

use crate::{
    tasks::{
        COMPLETED_SUBTITLE, DownloadStatus, ProcessingStage, ProcessingStatus, TaskMap,
        TaskStatus, UnifiedActiveTask, from_download, from_generation, from_recording_processing,
        merge, sweep_expired,
    },
    tests::fixtures::{at, download, generation, processing},
};

use jiff::SignedDuration;

const TTL: SignedDuration = SignedDuration::from_millis(1000);

fn running_download() -> UnifiedActiveTask {
    from_download(&download("whisper-base", DownloadStatus::Downloading))
}

fn running_processing() -> UnifiedActiveTask {
    from_recording_processing(&processing("r1", ProcessingStage::Upload, 10.0))
}

/// WHAT: Fresh rows are taken as-is into an empty view
/// WHY: Current data always wins
#[test]
fn given_empty_previous_when_merging_two_tasks_then_both_present_unchanged() {
    // Given: Nothing previously seen
    let previous = TaskMap::new();
    let a = running_download();
    let b = running_processing();

    // When: Merging two fresh rows
    let merged = merge(&previous, vec![a.clone(), b.clone()], at(1_700_000_100), TTL);

    // Then: Both present exactly
    assert_eq!(merged.len(), 2);
    assert_eq!(merged.get(&a.id), Some(&a));
    assert_eq!(merged.get(&b.id), Some(&b));
}

/// WHAT: A vanished running task completes, then expires after the TTL
/// WHY: Users need a short completion notice that does not linger
#[test]
fn given_running_task_when_it_vanishes_then_completed_then_expired() {
    // Given: One running task in the view
    let now = at(1_700_000_100);
    let task = running_download();
    let previous = merge(&TaskMap::new(), vec![task.clone()], now, TTL);

    // When: It disappears from the snapshot
    let merged = merge(&previous, Vec::new(), now, TTL);

    // Then: Completed and stamped
    let terminal = merged.get(&task.id).unwrap();
    assert_eq!(terminal.status, TaskStatus::Complete);
    assert_eq!(terminal.subtitle, COMPLETED_SUBTITLE);
    assert_eq!(terminal.terminal_at, Some(now));
    assert_eq!(terminal.updated_at, now);

    // When: Merging again two seconds later
    let later = merge(&merged, Vec::new(), now + SignedDuration::from_secs(2), TTL);

    // Then: Expired
    assert!(later.is_empty());
}

/// WHAT: Terminal rows survive until the TTL has fully elapsed
/// WHY: Expiry only happens strictly after the grace period
#[test]
fn given_terminal_task_when_exactly_ttl_elapsed_then_still_present() {
    let now = at(1_700_000_100);
    let task = running_download();
    let previous = merge(&TaskMap::new(), vec![task.clone()], now, TTL);
    let terminal = merge(&previous, Vec::new(), now, TTL);

    let at_ttl = merge(&terminal, Vec::new(), now + TTL, TTL);

    assert!(at_ttl.contains_key(&task.id));
}

/// WHAT: A failed task that vanishes stays an error
/// WHY: Failures must never be reported as completions
#[test]
fn given_error_task_when_it_vanishes_then_terminal_error() {
    // Given: A failed processing task
    let now = at(1_700_000_100);
    let mut record = processing("r1", ProcessingStage::Transcribe, 40.0);
    record.status = ProcessingStatus::Error;
    record.error = Some("transcriber crashed".to_string());
    let task = from_recording_processing(&record);
    let previous = merge(&TaskMap::new(), vec![task.clone()], now, TTL);

    // When: It disappears
    let merged = merge(&previous, Vec::new(), now, TTL);

    // Then: Error kept with its subtitle
    let terminal = merged.get(&task.id).unwrap();
    assert_eq!(terminal.status, TaskStatus::Error);
    assert_eq!(terminal.subtitle, "transcriber crashed");
    assert_eq!(terminal.terminal_at, Some(now));
}

/// WHAT: Re-merging an empty snapshot at the same instant changes nothing
/// WHY: Overlapping fetches must not re-stamp terminal rows
#[test]
fn given_terminal_view_when_merging_empty_twice_at_same_time_then_unchanged() {
    // Given: A view with one terminal row
    let t0 = at(1_700_000_100);
    let previous = merge(&TaskMap::new(), vec![running_download()], t0, TTL);
    let once = merge(&previous, Vec::new(), t0, TTL);

    // When: Merging the same empty snapshot again, slightly later but within TTL
    let twice = merge(&once, Vec::new(), t0, TTL);
    let later = merge(&once, Vec::new(), t0 + SignedDuration::from_millis(500), TTL);

    // Then: No re-stamp
    assert_eq!(twice, once);
    assert_eq!(later, once);
}

/// WHAT: A terminal row that reappears is replaced by the fresh row
/// WHY: Fresh data always wins over stale
#[test]
fn given_terminal_row_when_task_reappears_then_running_again() {
    let now = at(1_700_000_100);
    let task = running_download();
    let previous = merge(&TaskMap::new(), vec![task.clone()], now, TTL);
    let terminal = merge(&previous, Vec::new(), now, TTL);

    let merged = merge(&terminal, vec![task.clone()], now, TTL);

    let row = merged.get(&task.id).unwrap();
    assert_eq!(row.status, TaskStatus::Running);
    assert!(!row.is_terminal());
}

/// WHAT: Rows from every source are merged independently
/// WHY: One source finishing must not disturb the others
#[test]
fn given_mixed_sources_when_one_vanishes_then_others_untouched() {
    // Given: A download and a generation
    let now = at(1_700_000_100);
    let dl = running_download();
    let gen_task = from_generation(&generation("g1", "Hello"));
    let previous = merge(&TaskMap::new(), vec![dl.clone(), gen_task.clone()], now, TTL);

    // When: Only the download is still reported
    let merged = merge(&previous, vec![dl.clone()], now, TTL);

    // Then: Download unchanged, generation completed
    assert_eq!(merged.get(&dl.id), Some(&dl));
    assert_eq!(merged.get(&gen_task.id).unwrap().status, TaskStatus::Complete);
}

/// WHAT: Sweeping drops expired terminal rows and keeps the rest
/// WHY: A failed fetch still needs the grace period enforced
#[test]
fn given_expired_terminal_row_when_sweeping_then_only_that_row_removed() {
    // Given: One terminal and one running row
    let t0 = at(1_700_000_100);
    let running = running_processing();
    let previous = merge(&TaskMap::new(), vec![running_download(), running.clone()], t0, TTL);
    let view = merge(&previous, vec![running.clone()], t0, TTL);
    assert_eq!(view.len(), 2);

    // When: Sweeping after the TTL
    let swept = sweep_expired(view, t0 + SignedDuration::from_secs(5), TTL);

    // Then: Only the running row remains
    assert_eq!(swept.len(), 1);
    assert!(swept.contains_key(&running.id));
}
