//! `agf submit` - full controller flow against a stubbed collaborator

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use clap::ArgMatches;
use serde::Serialize;

use agriform_core::{
    forms, FormController, FormError, FormPhase, SubmissionError, SubmitOutcome, SubmitSink,
    Values,
};

use crate::cli::print_json;
use crate::commands::{read_values, sorted_errors};
use crate::config::Config;

/// Collaborator whose result is forced by `--outcome`.
struct ForcedSink {
    fail: bool,
}

#[async_trait]
impl SubmitSink for ForcedSink {
    async fn submit(&self, _values: Values) -> std::result::Result<(), SubmissionError> {
        if self.fail {
            Err(SubmissionError::new("submission rejected by --outcome fail"))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmitReport {
    form: String,
    phase: FormPhase,
    errors: BTreeMap<String, String>,
    focus: Option<String>,
    form_error: Option<String>,
}

/// Run `agf submit`
///
/// # Errors
///
/// Fails for an unknown form or unreadable input; a rejected validation
/// pass exits 1 and a forced collaborator failure exits 2, both after
/// printing the final snapshot.
pub async fn run(config: &Config, matches: &ArgMatches) -> Result<()> {
    let form_name = config.form_name(matches.get_one::<String>("form").map(String::as_str));
    let form = forms::by_name(form_name)?;

    let file = matches.get_one::<String>("file").map(PathBuf::from);
    let values = read_values(&form, file.as_deref())?;

    let mut controller = FormController::new(form);
    for (name, value) in &values {
        controller.on_field_change(name, value.clone())?;
    }

    let sink = ForcedSink {
        fail: matches.get_one::<String>("outcome").map(String::as_str) == Some("fail"),
    };
    let outcome = controller.submit(&sink).await;
    let snapshot = controller.snapshot();

    let focus = match &outcome {
        SubmitOutcome::Rejected { focus, .. } => {
            focus.as_ref().map(|name| name.as_str().to_string())
        }
        SubmitOutcome::Ignored { .. } | SubmitOutcome::InFlight { .. } => None,
    };
    let report = SubmitReport {
        form: controller.form().name().to_string(),
        phase: snapshot.phase,
        errors: sorted_errors(&snapshot.errors),
        focus,
        form_error: snapshot.form_error.clone(),
    };

    if config.json_output(matches.get_flag("json")) {
        print_json(&report)?;
    } else {
        #[allow(clippy::print_stdout)]
        {
            println!("phase: {}", report.phase);
            for (field, message) in &report.errors {
                println!("{field}: {message}");
            }
            if let Some(focus) = &report.focus {
                println!("First error: {focus}");
            }
            if let Some(form_error) = &report.form_error {
                println!("form error: {form_error}");
            }
        }
    }

    match report.phase {
        FormPhase::Submitted => Ok(()),
        FormPhase::Failed => Err(FormError::submission(
            report
                .form_error
                .unwrap_or_else(|| "submission failed".to_string()),
        )
        .into()),
        _ => anyhow::bail!("validation failed with {} error(s)", report.errors.len()),
    }
}
