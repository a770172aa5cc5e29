use crate::tasks::{TaskKey, TaskSourceKind};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Status shared by every task source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Still reported by its source.
    Running,
    /// Stopped being reported without an error.
    Complete,
    /// Reported a failure.
    Error,
}

/// One row of the unified active-task view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedActiveTask {
    /// Composite key, unique across sources.
    pub id: TaskKey,
    /// Producing source.
    pub source: TaskSourceKind,
    /// Primary line.
    pub title: String,
    /// Secondary line.
    pub subtitle: String,
    /// Current status.
    pub status: TaskStatus,
    /// Percent complete; `None` when indeterminate.
    pub progress: Option<f64>,
    /// When the task began.
    pub started_at: Timestamp,
    /// Last change.
    pub updated_at: Timestamp,
    /// When the task was synthesized as terminal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_at: Option<Timestamp>,
}

impl UnifiedActiveTask {
    /// True once the merger has synthesized a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.terminal_at.is_some()
    }
}
