//! Guarded transitions for the recording lifecycle.

use crate::lifecycle::RecordingLifecycleState;

use RecordingLifecycleState::{Armed, Error, Idle, Paused, Processing, Ready, Recording};

/// Outcome of a transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State after the request. Equals the current state when `valid` is false.
    pub next: RecordingLifecycleState,
    /// Whether the request was allowed.
    pub valid: bool,
}

/// States directly reachable from `from`, excluding `from` itself.
pub fn allowed_targets(from: RecordingLifecycleState) -> &'static [RecordingLifecycleState] {
    match from {
        Idle => &[Armed, Error],
        Armed => &[Recording, Idle, Error],
        Recording => &[Paused, Processing, Idle, Error],
        Paused => &[Recording, Processing, Idle, Error],
        Processing => &[Ready, Error, Idle],
        Ready => &[Armed, Recording, Idle, Error],
        Error => &[Idle, Armed],
    }
}

/// Request a move from `current` to `target`.
///
/// Same-state requests are always valid no-ops. Anything outside the
/// adjacency table is rejected and `next` stays at `current`; it is never
/// coerced to `target`.
pub fn transition(current: RecordingLifecycleState, target: RecordingLifecycleState) -> Transition {
    if current == target || allowed_targets(current).contains(&target) {
        Transition {
            next: target,
            valid: true,
        }
    } else {
        Transition {
            next: current,
            valid: false,
        }
    }
}
