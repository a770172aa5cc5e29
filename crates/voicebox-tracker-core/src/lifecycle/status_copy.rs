use crate::lifecycle::RecordingLifecycleState;

/// User-facing text for a lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCopy {
    /// Short status label.
    pub label: &'static str,
    /// One-line guidance shown under the label.
    pub hint: &'static str,
}

/// Pure lookup of the status text for `state`.
pub fn status_copy(state: RecordingLifecycleState) -> StatusCopy {
    match state {
        RecordingLifecycleState::Idle => StatusCopy {
            label: "Idle",
            hint: "Choose a microphone and arm the recorder to begin.",
        },
        RecordingLifecycleState::Armed => StatusCopy {
            label: "Armed",
            hint: "Start recording when you are ready.",
        },
        RecordingLifecycleState::Recording => StatusCopy {
            label: "Recording",
            hint: "Speak clearly. Recording stops automatically at the time limit.",
        },
        RecordingLifecycleState::Paused => StatusCopy {
            label: "Paused",
            hint: "Resume recording, or stop to process what was captured.",
        },
        RecordingLifecycleState::Processing => StatusCopy {
            label: "Processing",
            hint: "Processing the recording.",
        },
        RecordingLifecycleState::Ready => StatusCopy {
            label: "Ready",
            hint: "Recording processed. Record again or reset.",
        },
        RecordingLifecycleState::Error => StatusCopy {
            label: "Error",
            hint: "Something went wrong. Reset to try again.",
        },
    }
}
