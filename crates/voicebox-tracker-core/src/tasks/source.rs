use crate::{CoreResult, TrackerError, tasks::ActiveTasksSnapshot};

use std::{future::Future, panic::Location, time::Duration};

use error_location::ErrorLocation;
use tracing::{debug, instrument};

/// Path of the active-task listing relative to the backend base URL.
const ACTIVE_TASKS_PATH: &str = "/tasks/active";

/// Poll-able producer of active-task snapshots.
pub trait TaskSource: Send + Sync {
    /// Fetch the current snapshot of every active task.
    fn fetch_active_tasks(&self) -> impl Future<Output = CoreResult<ActiveTasksSnapshot>> + Send;
}

/// [`TaskSource`] backed by the backend's HTTP API.
#[derive(Debug, Clone)]
pub struct HttpTaskSource {
    client: reqwest::Client,
    url: String,
}

impl HttpTaskSource {
    /// Create a source for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be constructed.
    #[track_caller]
    pub fn new(base_url: &str, request_timeout: Duration) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| TrackerError::TaskFetchFailed {
                reason: format!("Failed to build HTTP client: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            client,
            url: format!("{}{}", base_url.trim_end_matches('/'), ACTIVE_TASKS_PATH),
        })
    }

    /// Fully qualified listing URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TaskSource for HttpTaskSource {
    #[instrument(level = "debug", skip(self), fields(url = %self.url))]
    async fn fetch_active_tasks(&self) -> CoreResult<ActiveTasksSnapshot> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| TrackerError::TaskFetchFailed {
                reason: format!("Request failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let snapshot: ActiveTasksSnapshot =
            response
                .json()
                .await
                .map_err(|e| TrackerError::TaskFetchFailed {
                    reason: format!("Failed to decode active tasks: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        debug!(
            downloads = snapshot.downloads.len(),
            generations = snapshot.generations.len(),
            recording_processing = snapshot.recording_processing.len(),
            "Active tasks fetched"
        );

        Ok(snapshot)
    }
}
