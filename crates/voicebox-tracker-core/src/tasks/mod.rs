mod adapters;
mod key;
mod merge;
mod records;
mod source;
mod stage;
mod unified;

pub use {
    adapters::{from_download, from_generation, from_recording_processing},
    key::{TaskKey, TaskSourceKind},
    merge::{COMPLETED_SUBTITLE, TaskMap, merge, sweep_expired},
    records::{
        ActiveDownloadTask, ActiveGenerationTask, ActiveRecordingProcessingTask,
        ActiveTasksSnapshot, DownloadStatus, ProcessingStatus,
    },
    source::{HttpTaskSource, TaskSource},
    stage::ProcessingStage,
    unified::{TaskStatus, UnifiedActiveTask},
};
