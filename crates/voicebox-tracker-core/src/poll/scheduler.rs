use std::{future::Future, time::Duration};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, warn};

/// Grace period `join` allows a poll loop to observe shutdown.
const JOIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Ticket for a running poll loop.
///
/// The loop receives a shutdown signal it is expected to select on.
/// Cancelling is immediate: the signal is raised and the task is aborted,
/// dropping any in-flight fetch. Dropping the handle cancels the loop, so a
/// loop can never outlive its owner.
pub struct PollHandle {
    name: &'static str,
    shutdown_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Spawn `body` on the current tokio runtime.
    pub fn spawn<F, Fut>(name: &'static str, body: F) -> Self
    where
        F: FnOnce(watch::Receiver<bool>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(body(shutdown_rx));

        debug!(poller = name, "Poll loop started");

        Self {
            name,
            shutdown_tx,
            task: Some(task),
        }
    }

    /// Name given at spawn time.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True once the loop has exited on its own or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stop the loop immediately.
    pub fn cancel(&mut self) {
        let _ = self.shutdown_tx.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(poller = self.name, "Poll loop cancelled");
        }
    }

    /// Signal shutdown and wait for the loop to exit.
    ///
    /// A loop that does not stop within one second is aborted.
    pub async fn join(mut self) {
        let _ = self.shutdown_tx.send(true);
        let Some(task) = self.task.take() else {
            return;
        };
        let abort = task.abort_handle();

        match tokio::time::timeout(JOIN_TIMEOUT, task).await {
            Ok(Ok(())) => debug!(poller = self.name, "Poll loop stopped cleanly"),
            Ok(Err(e)) if e.is_cancelled() => debug!(poller = self.name, "Poll loop cancelled"),
            Ok(Err(e)) => warn!(poller = self.name, error = ?e, "Poll loop panicked"),
            Err(_) => {
                abort.abort();
                warn!(poller = self.name, "Poll loop did not stop within timeout, aborted");
            }
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
