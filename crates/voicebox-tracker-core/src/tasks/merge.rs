//! Reconciles the previous task view with a fresh snapshot.

use crate::tasks::{TaskKey, TaskStatus, UnifiedActiveTask};

use std::collections::BTreeMap;

use jiff::{SignedDuration, Timestamp};
use tracing::{debug, instrument};

/// Unified task view keyed by composite id.
pub type TaskMap = BTreeMap<TaskKey, UnifiedActiveTask>;

/// Subtitle given to a task that finished without error.
pub const COMPLETED_SUBTITLE: &str = "Completed";

/// Merge a fresh snapshot into `previous`.
///
/// Fresh rows replace stale ones outright. A row that vanished from the
/// snapshot is stamped terminal exactly once (`error` stays `error`,
/// anything else becomes `complete`); rows already terminal are carried
/// over untouched until they are older than `terminal_ttl`. Applying the
/// same snapshot twice at the same `now` yields the same map.
#[instrument(level = "debug", skip_all, fields(previous = previous.len(), current = current.len()))]
pub fn merge(
    previous: &TaskMap,
    current: Vec<UnifiedActiveTask>,
    now: Timestamp,
    terminal_ttl: SignedDuration,
) -> TaskMap {
    let mut merged: TaskMap = current
        .into_iter()
        .map(|task| (task.id.clone(), task))
        .collect();

    for (id, task) in previous {
        if merged.contains_key(id) {
            continue;
        }

        if task.is_terminal() {
            merged.insert(id.clone(), task.clone());
            continue;
        }

        let mut terminal = task.clone();
        if terminal.status != TaskStatus::Error {
            terminal.status = TaskStatus::Complete;
            terminal.subtitle = COMPLETED_SUBTITLE.to_string();
        }
        terminal.terminal_at = Some(now);
        terminal.updated_at = now;

        debug!(task = %id, status = ?terminal.status, "Task no longer reported, marked terminal");
        merged.insert(id.clone(), terminal);
    }

    sweep_expired(merged, now, terminal_ttl)
}

/// Drop terminal rows whose grace period has elapsed.
pub fn sweep_expired(mut tasks: TaskMap, now: Timestamp, terminal_ttl: SignedDuration) -> TaskMap {
    tasks.retain(|id, task| match task.terminal_at {
        Some(terminal_at) if now.duration_since(terminal_at) > terminal_ttl => {
            debug!(task = %id, "Terminal task expired");
            false
        }
        _ => true,
    });
    tasks
}
