use crate::{
    CoreResult,
    poll::PollHandle,
    tasks::{ActiveRecordingProcessingTask, ProcessingStatus, TaskSource},
};

use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, time::MissedTickBehavior};
use tracing::{debug, info, warn};

/// What a single-task poller currently knows.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressState {
    /// Latest record for the task, if any.
    pub task: Option<ActiveRecordingProcessingTask>,
    /// False once the poller has concluded the task finished.
    pub is_polling: bool,
}

/// Bookkeeping for one polled task id.
///
/// "Not found" is ambiguous on its own: before the task has ever been seen
/// it means the backend has not started it yet, afterwards it means the
/// backend finished and removed it. Only the second case stops polling.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    task_id: String,
    has_seen: bool,
    last: Option<ActiveRecordingProcessingTask>,
    polling: bool,
}

impl ProgressTracker {
    /// Track `task_id`, initially unseen and polling.
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            has_seen: false,
            last: None,
            polling: true,
        }
    }

    /// Id being tracked.
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Whether the task has been observed at least once.
    pub fn has_seen(&self) -> bool {
        self.has_seen
    }

    /// Current published state.
    pub fn state(&self) -> ProgressState {
        ProgressState {
            task: self.last.clone(),
            is_polling: self.polling,
        }
    }

    /// Fold one fetch outcome into the state.
    ///
    /// A failed fetch keeps the last known task. Outcomes arriving after
    /// polling stopped are ignored.
    pub fn observe(
        &mut self,
        fetched: CoreResult<Option<ActiveRecordingProcessingTask>>,
    ) -> ProgressState {
        if !self.polling {
            return self.state();
        }

        match fetched {
            Err(e) => {
                warn!(task_id = %self.task_id, error = %e, "Progress fetch failed, keeping last known state");
            }
            Ok(Some(task)) => {
                let regressed = self
                    .last
                    .as_ref()
                    .and_then(|last| last.stage)
                    .zip(task.stage)
                    .filter(|(previous, current)| {
                        current < previous && task.status != ProcessingStatus::Error
                    });
                if let Some((previous, current)) = regressed {
                    warn!(
                        task_id = %self.task_id,
                        previous = %previous,
                        current = %current,
                        "Processing stage went backwards"
                    );
                }
                self.has_seen = true;
                self.last = Some(task);
            }
            Ok(None) if self.has_seen => {
                info!(task_id = %self.task_id, "Task no longer listed, treating as finished");
                self.last = None;
                self.polling = false;
            }
            Ok(None) => {
                debug!(task_id = %self.task_id, "Task not listed yet");
                self.last = None;
            }
        }

        self.state()
    }
}

/// Polls one recording-processing task until it finishes.
pub struct ProgressPoller;

impl ProgressPoller {
    /// Start polling `task_id` on `source` every `interval`.
    ///
    /// Each tick awaits its fetch before the next one is scheduled, so ticks
    /// never overlap. The loop exits by itself once the tracker stops.
    pub fn start<S>(
        source: Arc<S>,
        task_id: impl Into<String>,
        interval: Duration,
    ) -> (PollHandle, watch::Receiver<ProgressState>)
    where
        S: TaskSource + 'static,
    {
        let mut tracker = ProgressTracker::new(task_id);
        let (state_tx, state_rx) = watch::channel(tracker.state());

        let handle = PollHandle::spawn("progress", move |mut shutdown| async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown.changed() => {
                        debug!(task_id = %tracker.task_id(), "Progress poller shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        let fetched = source
                            .fetch_active_tasks()
                            .await
                            .map(|snapshot| snapshot.take_recording_task(tracker.task_id()));
                        let state = tracker.observe(fetched);
                        let polling = state.is_polling;
                        state_tx.send_replace(state);

                        if !polling {
                            break;
                        }
                    }
                }
            }
        });

        (handle, state_rx)
    }
}
