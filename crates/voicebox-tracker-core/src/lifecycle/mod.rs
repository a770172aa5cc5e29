mod failure;
mod session;
mod state;
mod status_copy;
mod transition;

pub use {
    failure::{LifecycleFailure, classify_capture_message},
    session::RecordingSession,
    state::RecordingLifecycleState,
    status_copy::{StatusCopy, status_copy},
    transition::{Transition, allowed_targets, transition},
};
