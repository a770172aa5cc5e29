mod progress;
mod scheduler;
mod sequence;
mod task_list;

pub use {
    progress::{ProgressPoller, ProgressState, ProgressTracker},
    scheduler::PollHandle,
    sequence::SequenceGate,
    task_list::TaskListPoller,
};

use std::time::Duration;

/// Default interval of the task-list poller.
pub const DEFAULT_TASK_LIST_INTERVAL: Duration = Duration::from_millis(1500);

/// Default interval of the single-task progress poller.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(700);
