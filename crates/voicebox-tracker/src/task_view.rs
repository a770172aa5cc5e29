//! Change detection between successive unified task views.

use voicebox_tracker_core::tasks::{TaskKey, TaskMap, TaskStatus, UnifiedActiveTask};

use std::fmt;

use jiff::Timestamp;

/// One difference between two published views.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TaskChange<'a> {
    /// Newly listed.
    Appeared(&'a UnifiedActiveTask),
    /// Still listed with different content.
    Updated(&'a UnifiedActiveTask),
    /// Just synthesized as complete or failed.
    Terminal(&'a UnifiedActiveTask),
    /// Dropped after its grace period.
    Expired(&'a TaskKey),
}

/// Changes that turn `previous` into `current`, in key order.
pub(crate) fn diff<'a>(previous: &'a TaskMap, current: &'a TaskMap) -> Vec<TaskChange<'a>> {
    let mut changes: Vec<TaskChange<'a>> = current
        .iter()
        .filter_map(|(id, task)| match previous.get(id) {
            None => Some(TaskChange::Appeared(task)),
            Some(before) if !before.is_terminal() && task.is_terminal() => {
                Some(TaskChange::Terminal(task))
            }
            Some(before) if before != task => Some(TaskChange::Updated(task)),
            Some(_) => None,
        })
        .collect();

    changes.extend(
        previous
            .keys()
            .filter(|id| !current.contains_key(*id))
            .map(TaskChange::Expired),
    );

    changes
}

/// One-line rendering of a task.
pub(crate) struct TaskLine<'a> {
    task: &'a UnifiedActiveTask,
    now: Timestamp,
}

impl<'a> TaskLine<'a> {
    pub(crate) fn new(task: &'a UnifiedActiveTask, now: Timestamp) -> Self {
        Self { task, now }
    }
}

impl fmt::Display for TaskLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let task = self.task;
        let status = match task.status {
            TaskStatus::Running => "running",
            TaskStatus::Complete => "complete",
            TaskStatus::Error => "error",
        };

        write!(f, "[{status}] {}: {}", task.title, task.subtitle)?;
        if let Some(progress) = task.progress {
            write!(f, " ({progress:.0}%)")?;
        }

        let age = self.now.duration_since(task.started_at).as_secs().max(0);
        write!(f, " {age}s  {}", task.id)
    }
}

impl fmt::Display for TaskChange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let now = Timestamp::now();
        match self {
            TaskChange::Appeared(task) => write!(f, "+ {}", TaskLine::new(task, now)),
            TaskChange::Updated(task) => write!(f, "~ {}", TaskLine::new(task, now)),
            TaskChange::Terminal(task) => write!(f, "= {}", TaskLine::new(task, now)),
            TaskChange::Expired(id) => write!(f, "- {id}"),
        }
    }
}
