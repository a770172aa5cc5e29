use crate::{
    CoreResult,
    poll::{PollHandle, SequenceGate},
    tasks::{ActiveTasksSnapshot, TaskMap, TaskSource, merge, sweep_expired},
};

use std::{sync::Arc, time::Duration};

use jiff::{SignedDuration, Timestamp};
use tokio::{sync::watch, task::JoinSet, time::MissedTickBehavior};
use tracing::{debug, warn};

/// Drives the unified task view from a [`TaskSource`].
pub struct TaskListPoller;

impl TaskListPoller {
    /// Start polling `source` every `interval`.
    ///
    /// A tick never waits for the previous fetch, so requests may overlap.
    /// Each request carries a sequence number and a response is merged only
    /// if nothing newer has been applied. Failed fetches leave the view as
    /// it was apart from expiring terminal rows.
    pub fn start<S>(
        source: Arc<S>,
        interval: Duration,
        terminal_ttl: SignedDuration,
    ) -> (PollHandle, watch::Receiver<TaskMap>)
    where
        S: TaskSource + 'static,
    {
        let (view_tx, view_rx) = watch::channel(TaskMap::new());

        let handle = PollHandle::spawn("task-list", move |mut shutdown| async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut gate = SequenceGate::new();
            let mut in_flight: JoinSet<(u64, CoreResult<ActiveTasksSnapshot>)> = JoinSet::new();

            loop {
                tokio::select! {
                    _ = shutdown.changed() => {
                        debug!("Task list poller shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        let seq = gate.issue();
                        let source = Arc::clone(&source);
                        in_flight.spawn(async move { (seq, source.fetch_active_tasks().await) });
                    }
                    Some(joined) = in_flight.join_next() => {
                        let (seq, fetched) = match joined {
                            Ok(result) => result,
                            Err(e) => {
                                warn!(error = ?e, "Task fetch did not complete");
                                continue;
                            }
                        };
                        let now = Timestamp::now();

                        match fetched {
                            Ok(snapshot) if gate.accept(seq) => {
                                let next = merge(&view_tx.borrow(), snapshot.into_unified(), now, terminal_ttl);
                                debug!(seq, tasks = next.len(), "Task view updated");
                                view_tx.send_replace(next);
                            }
                            Ok(_) => {
                                debug!(seq, last_applied = ?gate.last_applied(), "Discarding stale task snapshot");
                            }
                            Err(e) => {
                                warn!(seq, error = %e, "Task fetch failed, keeping last view");
                                view_tx.send_if_modified(|view| {
                                    let before = view.len();
                                    *view = sweep_expired(std::mem::take(view), now, terminal_ttl);
                                    view.len() != before
                                });
                            }
                        }
                    }
                }
            }
        });

        (handle, view_rx)
    }
}
