//! Form state: values, errors, and the current phase
//!
//! `FormState` is owned exclusively by one controller. Updates return new
//! states instead of mutating in place; the maps are persistent
//! (`im::HashMap`), so copies share structure and snapshots are cheap.
//!
//! An absent key in `errors` means "no error currently known for this
//! field", not "field is valid". Validity is authoritative only immediately
//! after a full validation pass.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::field::FieldName;
use crate::phase::FormPhase;

/// Field name to current string value.
pub type Values = im::HashMap<FieldName, String>;

/// Field name to error message; no entry means no known error.
pub type ErrorMap = im::HashMap<FieldName, String>;

/// The mutable state of one form instance.
#[derive(Debug, Clone)]
pub struct FormState {
    values: Values,
    errors: ErrorMap,
    form_error: Option<String>,
    phase: FormPhase,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// A fresh state: editing, all values empty, no errors
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: Values::new(),
            errors: ErrorMap::new(),
            form_error: None,
            phase: FormPhase::Editing,
        }
    }

    /// Current field values
    #[must_use]
    pub const fn values(&self) -> &Values {
        &self.values
    }

    /// Currently known field errors
    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// The whole-form error from a failed submission, if any
    #[must_use]
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// The current lifecycle phase
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// The stored value for a field, if one was ever set
    #[must_use]
    pub fn value(&self, name: &FieldName) -> Option<&String> {
        self.values.get(name)
    }

    /// Whether any field error or whole-form error is currently known
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.form_error.is_some()
    }

    /// Copy with one value set
    #[must_use]
    pub fn with_value(&self, name: FieldName, value: impl Into<String>) -> Self {
        Self {
            values: self.values.update(name, value.into()),
            ..self.clone()
        }
    }

    /// Copy with one field's error cleared
    #[must_use]
    pub fn without_error(&self, name: &FieldName) -> Self {
        Self {
            errors: self.errors.without(name),
            ..self.clone()
        }
    }

    /// Copy with the value and error of every named field removed.
    ///
    /// This is the deactivation clear: a field leaving the active set must
    /// not leak its stale value or stale error into a later validation.
    #[must_use]
    pub fn without_fields(&self, names: &BTreeSet<FieldName>) -> Self {
        let mut values = self.values.clone();
        let mut errors = self.errors.clone();
        for name in names {
            values = values.without(name);
            errors = errors.without(name);
        }
        Self {
            values,
            errors,
            ..self.clone()
        }
    }

    /// Copy with the error map replaced wholesale (a full-validate result)
    #[must_use]
    pub fn with_errors(&self, errors: ErrorMap) -> Self {
        Self {
            errors,
            ..self.clone()
        }
    }

    /// Copy with the whole-form error set or cleared
    #[must_use]
    pub fn with_form_error(&self, form_error: Option<String>) -> Self {
        Self {
            form_error,
            ..self.clone()
        }
    }

    /// Copy with the given phase
    #[must_use]
    pub fn with_phase(&self, phase: FormPhase) -> Self {
        Self {
            phase,
            ..self.clone()
        }
    }

    /// A read-only snapshot for the view layer
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            values: self.values.clone(),
            errors: self.errors.clone(),
            form_error: self.form_error.clone(),
            phase: self.phase,
        }
    }
}

/// Read-only view of a form's state for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    /// Current field values
    pub values: Values,
    /// Currently known field errors
    pub errors: ErrorMap,
    /// Whole-form error from a failed submission, if any
    pub form_error: Option<String>,
    /// Current lifecycle phase
    pub phase: FormPhase,
}
