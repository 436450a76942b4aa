//! Submission controller
//!
//! `FormController` owns one `FormState` and drives it through the phase
//! machine: field changes while editing, a validation gate on submit, and
//! an external collaborator call whose result resolves the attempt.
//!
//! Submission is two-stage so the collaborator call stays at the edge:
//! `begin_submit` runs validation and either rejects, ignores, or hands
//! back the values to submit; `complete_submit` applies the collaborator's
//! result. The async `submit` wrapper drives both stages against a
//! `SubmitSink`. Because `begin_submit` refuses to start while a previous
//! attempt is validating or submitting, the collaborator can never be
//! invoked twice for one attempt, double-clicks included.

use async_trait::async_trait;

use crate::error::{Result, SubmissionError};
use crate::field::FieldName;
use crate::form::FormDef;
use crate::lifecycle::LifecycleState;
use crate::phase::FormPhase;
use crate::state::{ErrorMap, FormSnapshot, FormState, Values};
use crate::validate::validate;

/// Whole-form message used when the collaborator reports no usable detail.
pub const DEFAULT_FORM_ERROR: &str =
    "There was an error submitting your scheme. Please try again.";

/// External submit collaborator.
///
/// Supplied by the caller (a network client in the real application, a
/// scripted stub in tests). The engine treats any `Err` as "failure
/// occurred" and surfaces its message verbatim.
#[async_trait]
pub trait SubmitSink: Send + Sync {
    /// Deliver the validated values to the outside world
    async fn submit(&self, values: Values) -> std::result::Result<(), SubmissionError>;
}

/// What a submit request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "an in-flight submission must be completed with complete_submit"]
pub enum SubmitOutcome {
    /// Validation found errors; the phase is back to editing
    Rejected {
        /// The freshly computed error mapping
        errors: ErrorMap,
        /// First erroring field in declaration order, for focus/scroll
        focus: Option<FieldName>,
    },
    /// The request arrived in a phase that does not accept submits
    Ignored {
        /// The phase that ignored the request
        phase: FormPhase,
    },
    /// Validation passed; the collaborator call is now owed
    InFlight {
        /// The values captured for the collaborator
        values: Values,
    },
}

/// Event-driven controller for one form instance.
#[derive(Debug)]
pub struct FormController {
    form: FormDef,
    state: FormState,
}

impl FormController {
    /// Create a controller in a fresh editing state
    #[must_use]
    pub fn new(form: FormDef) -> Self {
        Self {
            form,
            state: FormState::new(),
        }
    }

    /// The form definition this controller drives
    #[must_use]
    pub const fn form(&self) -> &FormDef {
        &self.form
    }

    /// The current phase
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.state.phase()
    }

    /// A read-only snapshot of `{values, errors, form_error, phase}`
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        self.state.snapshot()
    }

    /// Handle a field-change event.
    ///
    /// Stores the value, clears the field's own error, and, when the field
    /// is the discriminator, clears every field the change deactivates. A
    /// change in `failed` resumes `editing`; changes while a submission is
    /// validating, in flight, or acknowledged are ignored.
    ///
    /// # Errors
    ///
    /// Returns `FormError::UnknownField` when the name is not registered.
    /// That is a wiring defect in the caller, not a user condition.
    pub fn on_field_change(&mut self, name: &FieldName, value: impl Into<String>) -> Result<()> {
        self.form.registry().get(name)?;

        let phase = self.state.phase();
        if !phase.accepts_edits() {
            tracing::debug!(field = %name, %phase, "field change ignored");
            return Ok(());
        }
        if phase == FormPhase::Failed {
            self.transition(FormPhase::Editing);
            self.state = self.state.with_form_error(None);
        }

        let value = value.into();

        let deactivated = self
            .form
            .rules()
            .filter(|rules| rules.discriminator() == name)
            .map(|rules| {
                let old = self.state.value(name).map_or("", String::as_str);
                rules.deactivated(old, &value)
            });
        if let Some(dropped) = deactivated {
            if !dropped.is_empty() {
                tracing::debug!(field = %name, dropped = dropped.len(), "discriminator change deactivated fields");
                self.state = self.state.without_fields(&dropped);
            }
        }

        self.state = self.state.with_value(name.clone(), value).without_error(name);
        Ok(())
    }

    /// Handle a submit request: validate, then reject, ignore, or open an
    /// attempt.
    ///
    /// On `Rejected` the fresh error mapping replaces the old one wholesale
    /// and `focus` names the first erroring field in declaration order. On
    /// `InFlight` the caller owes exactly one collaborator call followed by
    /// `complete_submit`.
    pub fn begin_submit(&mut self) -> SubmitOutcome {
        let phase = self.state.phase();
        if !phase.accepts_submit() {
            tracing::debug!(%phase, "submit ignored");
            return SubmitOutcome::Ignored { phase };
        }

        self.transition(FormPhase::Validating);
        self.state = self.state.with_form_error(None);

        let active = self.form.active_fields(self.state.values());
        let errors = validate(&self.form, self.state.values(), &active);

        if errors.is_empty() {
            self.state = self.state.with_errors(ErrorMap::new());
            self.transition(FormPhase::Submitting);
            SubmitOutcome::InFlight {
                values: self.state.values().clone(),
            }
        } else {
            let focus = self.form.first_error_field(&errors);
            self.state = self.state.with_errors(errors.clone());
            self.transition(FormPhase::Editing);
            tracing::debug!(errors = errors.len(), "validation rejected submission");
            SubmitOutcome::Rejected { errors, focus }
        }
    }

    /// Apply the collaborator's result to an in-flight attempt.
    ///
    /// Success reaches `submitted` (terminal until `reset`). Failure
    /// reaches `failed` with the whole-form error set and every value
    /// retained for retry. Calls outside `submitting` are ignored.
    pub fn complete_submit(&mut self, outcome: std::result::Result<(), SubmissionError>) {
        let phase = self.state.phase();
        if phase != FormPhase::Submitting {
            tracing::warn!(%phase, "completion ignored outside submitting");
            return;
        }

        match outcome {
            Ok(()) => {
                self.transition(FormPhase::Submitted);
                tracing::info!(form = self.form.name(), "submission acknowledged");
            }
            Err(err) => {
                let message = if err.message().trim().is_empty() {
                    DEFAULT_FORM_ERROR.to_string()
                } else {
                    err.message().to_string()
                };
                self.state = self.state.with_form_error(Some(message));
                self.transition(FormPhase::Failed);
                tracing::warn!(form = self.form.name(), "submission failed");
            }
        }
    }

    /// Drive a full submit: validate, call the collaborator if clean,
    /// apply its result.
    ///
    /// Returns what `begin_submit` resolved to; for `InFlight` the
    /// collaborator has already been invoked (exactly once) and the final
    /// phase is observable via `snapshot`.
    pub async fn submit(&mut self, sink: &dyn SubmitSink) -> SubmitOutcome {
        match self.begin_submit() {
            SubmitOutcome::InFlight { values } => {
                let result = sink.submit(values.clone()).await;
                self.complete_submit(result);
                SubmitOutcome::InFlight { values }
            }
            other => other,
        }
    }

    /// Discard all state and start a fresh editing attempt
    pub fn reset(&mut self) {
        tracing::debug!(form = self.form.name(), "resetting form state");
        self.state = FormState::new();
    }

    fn transition(&mut self, next: FormPhase) {
        let from = self.state.phase();
        if !from.can_transition_to(next) {
            tracing::error!(%from, to = %next, "refusing invalid phase transition");
            return;
        }
        tracing::debug!(%from, to = %next, "phase transition");
        self.state = self.state.with_phase(next);
    }
}
