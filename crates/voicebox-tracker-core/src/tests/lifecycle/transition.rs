use crate::lifecycle::{
    RecordingLifecycleState, Transition, allowed_targets, status_copy, transition,
};

use std::collections::HashSet;

use RecordingLifecycleState::{Armed, Error, Idle, Paused, Processing, Ready, Recording};

/// WHAT: Requests outside the adjacency table are rejected without moving
/// WHY: Invalid requests must never be coerced to their target
#[test]
fn given_pair_outside_table_when_transitioning_then_state_unchanged_and_invalid() {
    // Given: Every ordered pair of distinct states
    let mut rejected = 0;

    for from in RecordingLifecycleState::ALL {
        for to in RecordingLifecycleState::ALL {
            if from == to || allowed_targets(from).contains(&to) {
                continue;
            }

            // When: Requesting the move
            let result = transition(from, to);

            // Then: Nothing changes and the request is flagged
            assert_eq!(
                result,
                Transition {
                    next: from,
                    valid: false
                },
                "{from} -> {to} should be rejected"
            );
            rejected += 1;
        }
    }

    // 42 ordered pairs, 22 edges in the table
    assert_eq!(rejected, 20);
}

/// WHAT: Same-state requests are valid no-ops
/// WHY: Repeated UI events must not be reported as programmer errors
#[test]
fn given_any_state_when_transitioning_to_itself_then_valid_noop() {
    for state in RecordingLifecycleState::ALL {
        // When: Requesting the current state
        let result = transition(state, state);

        // Then: Valid and unchanged
        assert_eq!(
            result,
            Transition {
                next: state,
                valid: true
            }
        );
    }
}

/// WHAT: Error exits only to idle or armed
/// WHY: Recovery requires an explicit reset or re-arm
#[test]
fn given_error_state_when_requesting_targets_then_only_idle_and_armed_allowed() {
    // Given/When: All targets from error
    let reachable: HashSet<_> = RecordingLifecycleState::ALL
        .into_iter()
        .filter(|&to| to != Error && transition(Error, to).valid)
        .collect();

    // Then: Exactly idle and armed
    assert_eq!(reachable, HashSet::from([Idle, Armed]));
}

/// WHAT: Error is reachable from every other state
/// WHY: Any operational failure must be able to stop the session
#[test]
fn given_non_error_state_when_failing_then_error_reachable() {
    for from in [Idle, Armed, Recording, Paused, Processing, Ready] {
        assert_eq!(
            transition(from, Error),
            Transition {
                next: Error,
                valid: true
            }
        );
    }
}

/// WHAT: Listed edges are accepted and move to the target
/// WHY: The normal recording path must work end to end
#[test]
fn given_recording_path_when_transitioning_then_each_step_valid() {
    // Given: The usual happy path
    let path = [Idle, Armed, Recording, Paused, Recording, Processing, Ready, Recording];

    // When/Then: Each step is valid and lands on its target
    for step in path.windows(2) {
        let result = transition(step[0], step[1]);
        assert!(result.valid, "{} -> {} should be valid", step[0], step[1]);
        assert_eq!(result.next, step[1]);
    }
}

/// WHAT: Skipping arming is rejected
/// WHY: Capture only starts from an armed or ready session
#[test]
fn given_idle_when_requesting_recording_then_rejected() {
    // When: Jumping from idle straight to recording
    let result = transition(Idle, Recording);

    // Then: Stays idle
    assert_eq!(
        result,
        Transition {
            next: Idle,
            valid: false
        }
    );
}

/// WHAT: Every state has its own status label
/// WHY: The status panel must distinguish all phases
#[test]
fn given_all_states_when_looking_up_status_copy_then_labels_distinct() {
    // When: Looking up every state's copy
    let labels: HashSet<_> = RecordingLifecycleState::ALL
        .into_iter()
        .map(|state| status_copy(state).label)
        .collect();

    // Then: No two states share a label and every hint is filled
    assert_eq!(labels.len(), RecordingLifecycleState::ALL.len());
    assert!(
        RecordingLifecycleState::ALL
            .into_iter()
            .all(|state| !status_copy(state).hint.is_empty())
    );
}
