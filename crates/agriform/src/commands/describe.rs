//! `agf describe` - print a form's schema

use std::collections::BTreeMap;

use anyhow::Result;
use clap::ArgMatches;
use serde::Serialize;

use agriform_core::{forms, FormDef};

use crate::cli::print_json;
use crate::config::Config;

#[derive(Debug, Serialize)]
struct FieldRow {
    name: String,
    label: String,
    kind: String,
    required: bool,
    conditional: bool,
}

#[derive(Debug, Serialize)]
struct FormSchema {
    form: String,
    discriminator: Option<String>,
    fields: Vec<FieldRow>,
    rules: BTreeMap<String, Vec<String>>,
}

fn schema(form: &FormDef) -> FormSchema {
    let universe = form
        .rules()
        .map(agriform_core::ConditionalRules::universe)
        .unwrap_or_default();

    let fields = form
        .registry()
        .all()
        .iter()
        .map(|spec| FieldRow {
            name: spec.name().as_str().to_string(),
            label: spec.label().to_string(),
            kind: spec.kind().name().to_string(),
            required: spec.is_required(),
            conditional: universe.contains(spec.name()),
        })
        .collect();

    let rules = form.rules().map_or_else(BTreeMap::new, |rules| {
        rules
            .table()
            .iter()
            .map(|(value, fields)| {
                (
                    value.clone(),
                    fields.iter().map(|f| f.as_str().to_string()).collect(),
                )
            })
            .collect()
    });

    FormSchema {
        form: form.name().to_string(),
        discriminator: form.discriminator().map(|d| d.as_str().to_string()),
        fields,
        rules,
    }
}

/// Run `agf describe`
///
/// # Errors
///
/// Fails for an unknown form name.
pub fn run(config: &Config, matches: &ArgMatches) -> Result<()> {
    let form_name = config.form_name(matches.get_one::<String>("form").map(String::as_str));
    let form = forms::by_name(form_name)?;
    let schema = schema(&form);

    if config.json_output(matches.get_flag("json")) {
        return print_json(&schema);
    }

    #[allow(clippy::print_stdout)]
    {
        println!("Form: {}", schema.form);
        match &schema.discriminator {
            Some(discriminator) => println!("Discriminator: {discriminator}"),
            None => println!("Discriminator: (none)"),
        }
        println!();
        println!("Fields (declaration order):");
        for field in &schema.fields {
            let mut flags = Vec::new();
            if field.required {
                flags.push("required");
            }
            if field.conditional {
                flags.push("conditional");
            }
            let suffix = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };
            println!("  {:<22} {:<8} {}{suffix}", field.name, field.kind, field.label);
        }
        if !schema.rules.is_empty() {
            println!();
            println!("Rules:");
            for (value, fields) in &schema.rules {
                println!("  {value} -> {}", fields.join(", "));
            }
        }
    }
    Ok(())
}
