use crate::{
    tasks::{
        DownloadStatus, ProcessingStage, ProcessingStatus, TaskSourceKind, TaskStatus,
        from_download, from_generation, from_recording_processing,
    },
    tests::fixtures::{download, generation, processing},
};

/// WHAT: Running downloads are indeterminate
/// WHY: The backend reports no download progress
#[test]
fn given_running_download_when_adapting_then_running_without_progress() {
    // Given: A download in progress
    let task = download("whisper-base", DownloadStatus::Downloading);

    // When: Adapting
    let unified = from_download(&task);

    // Then: Running, indeterminate, titled by model
    assert_eq!(unified.status, TaskStatus::Running);
    assert_eq!(unified.progress, None);
    assert_eq!(unified.title, "whisper-base");
    assert_eq!(unified.subtitle, "Downloading");
    assert_eq!(unified.source, TaskSourceKind::Download);
    assert!(!unified.is_terminal());
}

/// WHAT: Failed downloads carry the failure text
/// WHY: Failure and progress must read differently
#[test]
fn given_failed_download_when_adapting_then_error_with_reason() {
    let mut task = download("whisper-base", DownloadStatus::Error);
    task.error = Some("disk full".to_string());

    let unified = from_download(&task);

    assert_eq!(unified.status, TaskStatus::Error);
    assert_eq!(unified.subtitle, "Download failed: disk full");
}

/// WHAT: A failed download without text still says it failed
/// WHY: The subtitle must never look like progress
#[test]
fn given_failed_download_without_reason_when_adapting_then_generic_failure() {
    let unified = from_download(&download("whisper-base", DownloadStatus::Error));

    assert_eq!(unified.subtitle, "Download failed");
}

/// WHAT: Generations are running and show the text preview
/// WHY: The backend removes generations on completion
#[test]
fn given_generation_when_adapting_then_running_with_preview() {
    let unified = from_generation(&generation("g1", "Hello world"));

    assert_eq!(unified.status, TaskStatus::Running);
    assert_eq!(unified.subtitle, "Hello world");
    assert_eq!(unified.id.to_string(), "generation:g1");
}

/// WHAT: Processing subtitles prefer message, then stage label, then error
/// WHY: The most specific backend text should be shown
#[test]
fn given_processing_task_when_adapting_then_subtitle_fallback_order() {
    // Given: A task with a message
    let mut task = processing("r1", ProcessingStage::Embed, 60.0);
    task.message = Some("Almost there".to_string());

    // When/Then: Message wins
    assert_eq!(from_recording_processing(&task).subtitle, "Almost there");

    // When/Then: Without message the stage label is used
    task.message = None;
    assert_eq!(
        from_recording_processing(&task).subtitle,
        "Creating voice embedding"
    );

    // When/Then: Without stage the error is used
    task.stage = None;
    task.status = ProcessingStatus::Error;
    task.error = Some("transcriber crashed".to_string());
    let unified = from_recording_processing(&task);
    assert_eq!(unified.subtitle, "transcriber crashed");
    assert_eq!(unified.status, TaskStatus::Error);
}

/// WHAT: Processing progress and timestamps pass through
/// WHY: Processing is the only determinate source
#[test]
fn given_processing_task_when_adapting_then_progress_passed_through() {
    let task = processing("r1", ProcessingStage::Transcribe, 40.0);

    let unified = from_recording_processing(&task);

    assert_eq!(unified.progress, Some(40.0));
    assert_eq!(unified.updated_at, task.updated_at);
    assert_eq!(unified.status, TaskStatus::Running);
}
