//! Subcommand implementations
//!
//! One module per subcommand. Everything here is glue: argument shaping,
//! JSON rendering, exit-code mapping. Validation semantics live in
//! `agriform-core`.

pub mod completions;
pub mod describe;
pub mod session;
pub mod submit;
pub mod validate;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use agriform_core::{FieldName, FormDef, Values};

/// Read a JSON object of field values from a file or stdin.
///
/// Every key must name a registered field; an unknown key is the same
/// wiring error the engine reports for unknown fields.
pub(crate) fn read_values(form: &FormDef, file: Option<&Path>) -> Result<Values> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read values file {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read values from stdin")?;
            buffer
        }
    };

    let trimmed = raw.trim();
    let parsed: BTreeMap<String, String> = if trimmed.is_empty() {
        BTreeMap::new()
    } else {
        serde_json::from_str(trimmed)
            .context("values must be a JSON object mapping field names to strings")?
    };

    let mut values = Values::new();
    for (key, value) in parsed {
        let name = FieldName::parse(key)?;
        form.registry().get(&name)?;
        values = values.update(name, value);
    }
    Ok(values)
}

/// Deterministically ordered copy of an engine error map for output.
pub(crate) fn sorted_errors(errors: &agriform_core::ErrorMap) -> BTreeMap<String, String> {
    errors
        .iter()
        .map(|(name, message)| (name.as_str().to_string(), message.clone()))
        .collect()
}
