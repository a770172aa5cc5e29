use crate::{capture::CaptureFailureKind, lifecycle::RecordingLifecycleState};

use error_location::ErrorLocation;
use thiserror::Error;

/// Tracker errors with source location tracking.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A lifecycle transition outside the adjacency table was requested.
    #[error("Invalid lifecycle transition: {from} -> {to} {location}")]
    InvalidTransition {
        /// State the session was in.
        from: RecordingLifecycleState,
        /// State that was requested.
        to: RecordingLifecycleState,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The active-task list could not be fetched or decoded.
    #[error("Task fetch failed: {reason} {location}")]
    TaskFetchFailed {
        /// Description of the transport or decode failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The input device list could not be enumerated.
    #[error("Device listing failed: {reason} {location}")]
    DeviceListFailed {
        /// Description of the enumeration failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Native capture failed to start, pause, resume or stop.
    #[error("Capture failed ({kind}): {reason} {location}")]
    CaptureFailed {
        /// Classified failure category.
        kind: CaptureFailureKind,
        /// Raw technical description from the capture backend.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A composite task key that is not `<source>:<id>`.
    #[error("Invalid task key: {value} {location}")]
    InvalidTaskKey {
        /// The rejected key.
        value: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl TrackerError {
    /// Capture failure category, if this error came from the capture backend.
    pub fn capture_kind(&self) -> Option<CaptureFailureKind> {
        match self {
            TrackerError::CaptureFailed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result type alias using [`TrackerError`].
pub type Result<T> = std::result::Result<T, TrackerError>;
