use crate::config::{
    default_progress_interval_ms, default_task_list_interval_ms, default_terminal_ttl_ms,
};

use std::time::Duration;

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

/// Poller timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Interval of the task-list poller.
    #[serde(default = "default_task_list_interval_ms")]
    pub task_list_interval_ms: u64,

    /// Interval of the single-task progress poller.
    #[serde(default = "default_progress_interval_ms")]
    pub progress_interval_ms: u64,

    /// How long finished tasks stay in the view.
    #[serde(default = "default_terminal_ttl_ms")]
    pub terminal_ttl_ms: u64,
}

impl PollingConfig {
    pub(crate) fn task_list_interval(&self) -> Duration {
        Duration::from_millis(self.task_list_interval_ms)
    }

    pub(crate) fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub(crate) fn terminal_ttl(&self) -> SignedDuration {
        SignedDuration::from_millis(i64::try_from(self.terminal_ttl_ms).unwrap_or(i64::MAX))
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            task_list_interval_ms: default_task_list_interval_ms(),
            progress_interval_ms: default_progress_interval_ms(),
            terminal_ttl_ms: default_terminal_ttl_ms(),
        }
    }
}
