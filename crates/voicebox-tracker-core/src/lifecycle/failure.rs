use crate::{TrackerError, capture::CaptureFailureKind};

/// Failure recorded when a session enters the error state.
///
/// `summary` is what a user sees; `detail` keeps the raw backend text for
/// diagnostics and is never the primary message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleFailure {
    /// Failure category.
    pub kind: CaptureFailureKind,
    /// Human-readable, actionable summary.
    pub summary: String,
    /// Raw technical detail.
    pub detail: String,
}

impl LifecycleFailure {
    /// Build a failure of `kind` with the stock summary for that kind.
    pub fn new(kind: CaptureFailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            summary: kind.summary().to_string(),
            detail: detail.into(),
        }
    }

    /// Failure raised when the session's device vanished mid-capture.
    pub fn device_disconnected(device_id: &str) -> Self {
        Self::new(
            CaptureFailureKind::Device,
            format!("Input device '{device_id}' disappeared during capture"),
        )
    }
}

impl From<&TrackerError> for LifecycleFailure {
    fn from(err: &TrackerError) -> Self {
        let kind = err.capture_kind().unwrap_or(CaptureFailureKind::Capture);
        Self::new(kind, err.to_string())
    }
}

/// Classify a free-form native error message.
///
/// Capture backends report permission problems only as text, so this is
/// the single place that text is inspected.
pub fn classify_capture_message(message: &str) -> CaptureFailureKind {
    let lower = message.to_lowercase();

    if ["permission", "denied", "not authorized", "not allowed", "notallowed"]
        .iter()
        .any(|needle| lower.contains(needle))
    {
        CaptureFailureKind::Permission
    } else if [
        "device not available",
        "no such device",
        "disconnected",
        "unplugged",
        "not found",
    ]
    .iter()
    .any(|needle| lower.contains(needle))
    {
        CaptureFailureKind::Device
    } else {
        CaptureFailureKind::Capture
    }
}
