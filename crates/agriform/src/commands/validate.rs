//! `agf validate` - one validation pass over supplied values

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::ArgMatches;
use serde::Serialize;

use agriform_core::{forms, validate};

use crate::cli::print_json;
use crate::commands::{read_values, sorted_errors};
use crate::config::Config;

#[derive(Debug, Serialize)]
struct ValidateReport {
    form: String,
    clean: bool,
    errors: BTreeMap<String, String>,
    focus: Option<String>,
}

/// Run `agf validate`
///
/// Exit is clean when the pass finds nothing; otherwise the error mapping
/// is printed and the command fails (exit code 1).
///
/// # Errors
///
/// Fails for an unknown form, unreadable input, or a non-empty error
/// mapping.
pub fn run(config: &Config, matches: &ArgMatches) -> Result<()> {
    let form_name = config.form_name(matches.get_one::<String>("form").map(String::as_str));
    let form = forms::by_name(form_name)?;

    let file = matches.get_one::<String>("file").map(PathBuf::from);
    let values = read_values(&form, file.as_deref())?;

    let active = form.active_fields(&values);
    let errors = validate(&form, &values, &active);
    let focus = form.first_error_field(&errors);

    let report = ValidateReport {
        form: form.name().to_string(),
        clean: errors.is_empty(),
        errors: sorted_errors(&errors),
        focus: focus.map(|name| name.as_str().to_string()),
    };

    if config.json_output(matches.get_flag("json")) {
        print_json(&report)?;
    } else {
        #[allow(clippy::print_stdout)]
        {
            if report.clean {
                println!("ok: no validation errors");
            } else {
                for (field, message) in &report.errors {
                    println!("{field}: {message}");
                }
                if let Some(focus) = &report.focus {
                    println!();
                    println!("First error: {focus}");
                }
            }
        }
    }

    if report.clean {
        Ok(())
    } else {
        anyhow::bail!("validation failed with {} error(s)", report.errors.len())
    }
}
