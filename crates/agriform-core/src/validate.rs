//! The validation pass
//!
//! `validate` is a pure function: no logging, no clock, no state beyond
//! its arguments. Failures are data (a field-to-message mapping), never
//! errors, so a validation pass cannot abort halfway and callers can diff
//! consecutive results.
//!
//! Check order per field: requiredness first, then the kind's format check
//! on the trimmed value. Format checks never run for empty values; an
//! optional field left blank is simply absent from the result.

use std::collections::BTreeSet;

use crate::field::FieldName;
use crate::form::FormDef;
use crate::state::{ErrorMap, Values};

/// Run one validation pass over the working set.
///
/// The working set is every registered field except conditional fields not
/// present in `active`. Fields outside the working set never contribute a
/// result entry, whatever value they hold.
#[must_use]
pub fn validate(form: &FormDef, values: &Values, active: &BTreeSet<FieldName>) -> ErrorMap {
    let mut errors = ErrorMap::new();

    for spec in form.working_set(active) {
        let value = values.get(spec.name()).map_or("", String::as_str);
        let trimmed = value.trim();

        if trimmed.is_empty() {
            if spec.is_required() {
                errors = errors.update(spec.name().clone(), spec.required_message());
            }
            continue;
        }

        if let Some(message) = spec.kind().check(trimmed) {
            errors = errors.update(spec.name().clone(), message);
        }
    }

    errors
}
