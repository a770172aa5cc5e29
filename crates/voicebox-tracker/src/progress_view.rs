//! Turns progress poller states into what the `progress` command prints.

use voicebox_tracker_core::{poll::ProgressState, tasks::ProcessingStatus};

/// Fallback text for a failed task that carries no error or message.
const UNKNOWN_FAILURE: &str = "Processing failed";

/// What to do with one published progress state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ProgressEvent {
    /// Print a status line and keep following.
    Line(String),
    /// The task finished; print and stop successfully.
    Finished(String),
    /// The task failed; print and stop with an error.
    Failed(String),
}

/// Remembers what the task last looked like so its disappearance can be
/// reported as the right outcome.
#[derive(Debug, Clone)]
pub(crate) struct ProgressView {
    task_id: String,
    last_failure: Option<String>,
}

impl ProgressView {
    pub(crate) fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            last_failure: None,
        }
    }

    /// Map `state` to an event.
    ///
    /// A task reporting `error` fails immediately with its error text. A
    /// task that disappears after last being seen failed is still a failure.
    pub(crate) fn observe(&mut self, state: &ProgressState) -> ProgressEvent {
        let id = &self.task_id;

        let Some(task) = &state.task else {
            return match (&self.last_failure, state.is_polling) {
                (_, true) => ProgressEvent::Line(format!("{id}: waiting to start")),
                (Some(reason), false) => ProgressEvent::Failed(format!("{id}: failed: {reason}")),
                (None, false) => ProgressEvent::Finished(format!("{id}: finished")),
            };
        };

        if task.status == ProcessingStatus::Error {
            let reason = task
                .error
                .as_deref()
                .or(task.message.as_deref())
                .unwrap_or(UNKNOWN_FAILURE)
                .to_string();
            let event = ProgressEvent::Failed(format!("{id}: failed: {reason}"));
            self.last_failure = Some(reason);
            return event;
        }
        self.last_failure = None;

        let stage = task.stage.map_or("pending", |stage| stage.label());
        let mut line = format!("{id}: {stage}");
        if let Some(progress) = task.progress {
            line.push_str(&format!(" {progress:.0}%"));
        }
        if let Some(message) = &task.message {
            line.push_str(&format!(" ({message})"));
        }

        if task.status == ProcessingStatus::Complete {
            ProgressEvent::Finished(line)
        } else {
            ProgressEvent::Line(line)
        }
    }
}
