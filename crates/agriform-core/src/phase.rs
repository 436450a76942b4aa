//! Submission phase state machine
//!
//! One `FormPhase` value tracks where a form instance is in its submission
//! lifecycle. Transitions are a closed table; everything not listed is
//! rejected. The controller consults this table before every move, so an
//! invalid transition can only mean a controller bug, never user input.
//!
//! Transition table:
//! - `editing -> validating` (submit requested)
//! - `validating -> editing` (validation found errors)
//! - `validating -> submitting` (validation clean)
//! - `submitting -> submitted` (collaborator succeeded)
//! - `submitting -> failed` (collaborator failed)
//! - `failed -> editing` (user resumes editing)
//! - `failed -> validating` (retry submit, values retained)
//! - `submitted` is terminal; a fresh attempt requires an explicit reset

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::lifecycle::LifecycleState;

/// Where a form instance is in its submission lifecycle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    Hash,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FormPhase {
    /// Accepting field changes and submit requests
    Editing,
    /// A validation pass is running
    Validating,
    /// The external collaborator is in flight
    Submitting,
    /// The collaborator acknowledged the submission
    Submitted,
    /// The collaborator rejected the submission; values are retained
    Failed,
}

impl FormPhase {
    /// Whether a submit request is accepted in this phase.
    ///
    /// Submits during `validating` and `submitting` are no-ops so a
    /// double-click cannot start a second attempt; `submitted` is final.
    #[must_use]
    pub const fn accepts_submit(self) -> bool {
        matches!(self, Self::Editing | Self::Failed)
    }

    /// Whether field-change events are accepted in this phase
    #[must_use]
    pub const fn accepts_edits(self) -> bool {
        matches!(self, Self::Editing | Self::Failed)
    }
}

impl LifecycleState for FormPhase {
    fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Editing, Self::Validating)
                | (Self::Validating, Self::Editing | Self::Submitting)
                | (Self::Submitting, Self::Submitted | Self::Failed)
                | (Self::Failed, Self::Editing | Self::Validating)
        )
    }

    fn valid_next_states(self) -> Vec<Self> {
        match self {
            Self::Editing => vec![Self::Validating],
            Self::Validating => vec![Self::Editing, Self::Submitting],
            Self::Submitting => vec![Self::Submitted, Self::Failed],
            Self::Submitted => vec![],
            Self::Failed => vec![Self::Editing, Self::Validating],
        }
    }

    fn is_terminal(self) -> bool {
        matches!(self, Self::Submitted)
    }

    fn all_states() -> &'static [Self] {
        &[
            Self::Editing,
            Self::Validating,
            Self::Submitting,
            Self::Submitted,
            Self::Failed,
        ]
    }
}
