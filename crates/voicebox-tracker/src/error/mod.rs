use voicebox_tracker_core::TrackerError;

use std::{panic::Location, result::Result as StdResult};

use error_location::ErrorLocation;
use thiserror::Error;

/// Application-level errors for the voicebox-tracker binary.
///
/// All variants include `ErrorLocation` for call-site tracking.
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from voicebox-tracker-core.
    #[error("Tracker error: {source} {location}")]
    Tracker {
        /// The underlying tracker error.
        #[source]
        source: TrackerError,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// The recording session ended in the error state.
    #[error("Recording failed: {summary} {location}")]
    RecordingFailed {
        /// Human-readable failure summary.
        summary: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// The followed processing task reported an error.
    #[error("Processing failed: {reason} {location}")]
    ProcessingFailed {
        /// Error text reported by the backend.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Captured audio could not be written as WAV.
    #[error("WAV output failed: {reason} {location}")]
    WavError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// A blocking worker task did not complete.
    #[error("Background task failed: {reason} {location}")]
    TaskJoinFailed {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// Configuration loading, validation or saving error.
    #[error("Configuration error: {reason} {location}")]
    ConfigError {
        /// Human-readable reason for failure.
        reason: String,
        /// Location where this error was created.
        location: ErrorLocation,
    },

    /// IO error from filesystem operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Location where this error was created.
        location: ErrorLocation,
    },
}

// Manual From<TrackerError> with location tracking.
// Cannot use #[from] because it does not support extra fields.
impl From<TrackerError> for AppError {
    #[track_caller]
    fn from(source: TrackerError) -> Self {
        AppError::Tracker {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for AppError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        AppError::IoError {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<hound::Error> for AppError {
    #[track_caller]
    fn from(err: hound::Error) -> Self {
        AppError::WavError {
            reason: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Convenience type alias for Results using `AppError`.
pub type Result<T> = StdResult<T, AppError>;
