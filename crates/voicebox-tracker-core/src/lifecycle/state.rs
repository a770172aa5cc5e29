use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse-grained phase of one recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingLifecycleState {
    /// Nothing selected for capture yet.
    Idle,
    /// Device chosen, waiting for the user to start.
    Armed,
    /// Capture is running.
    Recording,
    /// Capture is suspended but not finished.
    Paused,
    /// Capture finished, audio is being handed off.
    Processing,
    /// Audio processed and available.
    Ready,
    /// An operational failure occurred; requires an explicit reset.
    Error,
}

impl RecordingLifecycleState {
    /// Every state, in declaration order.
    pub const ALL: [RecordingLifecycleState; 7] = [
        RecordingLifecycleState::Idle,
        RecordingLifecycleState::Armed,
        RecordingLifecycleState::Recording,
        RecordingLifecycleState::Paused,
        RecordingLifecycleState::Processing,
        RecordingLifecycleState::Ready,
        RecordingLifecycleState::Error,
    ];

    /// Lower-case wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            RecordingLifecycleState::Idle => "idle",
            RecordingLifecycleState::Armed => "armed",
            RecordingLifecycleState::Recording => "recording",
            RecordingLifecycleState::Paused => "paused",
            RecordingLifecycleState::Processing => "processing",
            RecordingLifecycleState::Ready => "ready",
            RecordingLifecycleState::Error => "error",
        }
    }

    /// True while a native capture stream is owned by the session.
    pub fn holds_capture(self) -> bool {
        matches!(
            self,
            RecordingLifecycleState::Recording | RecordingLifecycleState::Paused
        )
    }
}

impl fmt::Display for RecordingLifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
