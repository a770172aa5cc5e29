use crate::tasks::{ProcessingStage, UnifiedActiveTask, adapters};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Backend status of a model download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    /// Fetching model files.
    Downloading,
    /// Unpacking a downloaded archive.
    Extracting,
    /// Finished; normally removed from the list right after.
    Complete,
    /// Failed; stays listed with an error until acknowledged.
    Error,
    /// Any status this client does not know.
    #[serde(other)]
    Other,
}

/// Backend status of a recording-processing task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    /// Pipeline still working.
    Running,
    /// Pipeline finished.
    Complete,
    /// Pipeline failed.
    Error,
    /// Any status this client does not know.
    #[serde(other)]
    Other,
}

/// Model download reported by `GET /tasks/active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveDownloadTask {
    /// Model being downloaded; unique among downloads.
    pub model_name: String,
    /// Download status.
    pub status: DownloadStatus,
    /// When the download began.
    pub started_at: Timestamp,
    /// Failure text when `status` is `error`.
    #[serde(default)]
    pub error: Option<String>,
}

/// Speech generation reported by `GET /tasks/active`.
///
/// The backend drops the record on completion without a terminal payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveGenerationTask {
    /// Generation id.
    pub task_id: String,
    /// Voice profile used.
    pub profile_id: String,
    /// Leading characters of the text being spoken.
    pub text_preview: String,
    /// When generation began.
    pub started_at: Timestamp,
}

/// Recording-processing task reported by `GET /tasks/active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveRecordingProcessingTask {
    /// Task id.
    pub task_id: String,
    /// Pipeline status.
    pub status: ProcessingStatus,
    /// Current pipeline stage; absent before the pipeline reports one.
    #[serde(default)]
    pub stage: Option<ProcessingStage>,
    /// Percent complete, `0.0..=100.0`.
    #[serde(default)]
    pub progress: Option<f64>,
    /// Backend-supplied status line.
    #[serde(default)]
    pub message: Option<String>,
    /// When processing began.
    pub started_at: Timestamp,
    /// Last backend update.
    pub updated_at: Timestamp,
    /// Failure text when `status` is `error`.
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `GET /tasks/active`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActiveTasksSnapshot {
    /// Active model downloads.
    #[serde(default)]
    pub downloads: Vec<ActiveDownloadTask>,
    /// Active speech generations.
    #[serde(default)]
    pub generations: Vec<ActiveGenerationTask>,
    /// Active recording-processing tasks.
    #[serde(default)]
    pub recording_processing: Vec<ActiveRecordingProcessingTask>,
}

impl ActiveTasksSnapshot {
    /// Map every record through its source adapter.
    pub fn into_unified(self) -> Vec<UnifiedActiveTask> {
        let downloads = self.downloads.iter().map(adapters::from_download);
        let generations = self.generations.iter().map(adapters::from_generation);
        let processing = self
            .recording_processing
            .iter()
            .map(adapters::from_recording_processing);

        downloads.chain(generations).chain(processing).collect()
    }

    /// Take the recording-processing record with `task_id`, if listed.
    pub fn take_recording_task(self, task_id: &str) -> Option<ActiveRecordingProcessingTask> {
        self.recording_processing
            .into_iter()
            .find(|task| task.task_id == task_id)
    }
}
