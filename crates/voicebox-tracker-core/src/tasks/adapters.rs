//! Pure mappings from source records into [`UnifiedActiveTask`].

use crate::tasks::{
    ActiveDownloadTask, ActiveGenerationTask, ActiveRecordingProcessingTask, DownloadStatus,
    ProcessingStatus, TaskKey, TaskSourceKind, TaskStatus, UnifiedActiveTask,
};

/// Map a download. Downloads are indeterminate, so `progress` is `None`.
pub fn from_download(task: &ActiveDownloadTask) -> UnifiedActiveTask {
    let (status, subtitle) = match task.status {
        DownloadStatus::Error => (
            TaskStatus::Error,
            match task.error.as_deref() {
                Some(error) if !error.is_empty() => format!("Download failed: {}", error),
                _ => "Download failed".to_string(),
            },
        ),
        DownloadStatus::Extracting => (TaskStatus::Running, "Extracting".to_string()),
        _ => (TaskStatus::Running, "Downloading".to_string()),
    };

    UnifiedActiveTask {
        id: TaskKey::new(TaskSourceKind::Download, task.model_name.clone()),
        source: TaskSourceKind::Download,
        title: task.model_name.clone(),
        subtitle,
        status,
        progress: None,
        started_at: task.started_at,
        updated_at: task.started_at,
        terminal_at: None,
    }
}

/// Map a generation. Present generations are always running.
pub fn from_generation(task: &ActiveGenerationTask) -> UnifiedActiveTask {
    UnifiedActiveTask {
        id: TaskKey::new(TaskSourceKind::Generation, task.task_id.clone()),
        source: TaskSourceKind::Generation,
        title: "Generating speech".to_string(),
        subtitle: task.text_preview.clone(),
        status: TaskStatus::Running,
        progress: None,
        started_at: task.started_at,
        updated_at: task.started_at,
        terminal_at: None,
    }
}

/// Map a recording-processing task.
///
/// The subtitle prefers the backend message, then the stage label, then the
/// error text.
pub fn from_recording_processing(task: &ActiveRecordingProcessingTask) -> UnifiedActiveTask {
    let status = match task.status {
        ProcessingStatus::Error => TaskStatus::Error,
        _ => TaskStatus::Running,
    };

    let subtitle = task
        .message
        .as_deref()
        .filter(|message| !message.is_empty())
        .or_else(|| task.stage.map(|stage| stage.label()))
        .or_else(|| task.error.as_deref().filter(|error| !error.is_empty()))
        .unwrap_or("Processing")
        .to_string();

    UnifiedActiveTask {
        id: TaskKey::new(TaskSourceKind::RecordingProcessing, task.task_id.clone()),
        source: TaskSourceKind::RecordingProcessing,
        title: "Processing recording".to_string(),
        subtitle,
        status,
        progress: task.progress,
        started_at: task.started_at,
        updated_at: task.updated_at,
        terminal_at: None,
    }
}
