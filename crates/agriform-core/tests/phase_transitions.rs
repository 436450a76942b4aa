//! Exhaustive phase transition tests
//!
//! Tests all valid and invalid transitions for the form submission phase
//! machine, plus the lifecycle contract every phase enum must honor.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

use agriform_core::{FormPhase, LifecycleState};

const ALL: [FormPhase; 5] = [
    FormPhase::Editing,
    FormPhase::Validating,
    FormPhase::Submitting,
    FormPhase::Submitted,
    FormPhase::Failed,
];

/// The complete set of permitted transitions. Every pair not listed here
/// must be rejected.
const VALID: [(FormPhase, FormPhase); 7] = [
    (FormPhase::Editing, FormPhase::Validating),
    (FormPhase::Validating, FormPhase::Editing),
    (FormPhase::Validating, FormPhase::Submitting),
    (FormPhase::Submitting, FormPhase::Submitted),
    (FormPhase::Submitting, FormPhase::Failed),
    (FormPhase::Failed, FormPhase::Editing),
    (FormPhase::Failed, FormPhase::Validating),
];

#[test]
fn test_exhaustive_transition_table() {
    for from in ALL {
        for to in ALL {
            let expected = VALID.contains(&(from, to));
            assert_eq!(
                from.can_transition_to(to),
                expected,
                "transition {from} -> {to} should be {expected}"
            );
        }
    }
}

#[test]
fn test_valid_next_states_agree_with_transition_predicate() {
    for from in ALL {
        let nexts = from.valid_next_states();
        for to in ALL {
            assert_eq!(from.can_transition_to(to), nexts.contains(&to));
        }
    }
}

#[test]
fn test_submitted_is_the_only_terminal_phase() {
    for phase in ALL {
        assert_eq!(phase.is_terminal(), phase == FormPhase::Submitted);
    }
}

#[test]
fn test_non_terminal_phases_can_move_somewhere() {
    for phase in ALL {
        if !phase.is_terminal() {
            assert!(!phase.valid_next_states().is_empty());
        }
    }
}

#[test]
fn test_all_states_matches_the_known_set() {
    assert_eq!(FormPhase::all_states(), &ALL);
}

#[test]
fn test_no_phase_transitions_to_itself() {
    for phase in ALL {
        assert!(!phase.can_transition_to(phase));
    }
}

#[test]
fn test_submitting_is_unreachable_without_validation() {
    // The only way into submitting is through a clean validating pass
    for from in ALL {
        if from != FormPhase::Validating {
            assert!(!from.can_transition_to(FormPhase::Submitting));
        }
    }
}
