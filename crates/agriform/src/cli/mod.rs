//! CLI command definitions using `clap` and output helpers

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command as ClapCommand};
use serde::Serialize;

use crate::commands;
use crate::config::Config;

/// Render an EXAMPLES block for a subcommand's after-help
pub fn after_help_text(examples: &[&str]) -> String {
    let mut text = String::from("EXAMPLES:\n");
    for example in examples {
        text.push_str("  ");
        text.push_str(example);
        text.push('\n');
    }
    text
}

fn arg_form() -> Arg {
    Arg::new("form")
        .long("form")
        .value_name("NAME")
        .help("Form to operate on (scheme, registration)")
}

fn arg_json() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output as JSON")
}

fn arg_file() -> Arg {
    Arg::new("file")
        .long("file")
        .value_name("PATH")
        .help("JSON object of field values (read from stdin when omitted)")
}

fn cmd_describe() -> ClapCommand {
    ClapCommand::new("describe")
        .about("Print a form's field table, rule table, and required set")
        .arg(arg_form())
        .arg(arg_json())
        .after_help(after_help_text(&[
            "agf describe                        Describe the scheme form",
            "agf describe --form registration    Describe the registration form",
            "agf describe --json                 Machine-readable schema",
        ]))
}

fn cmd_validate() -> ClapCommand {
    ClapCommand::new("validate")
        .about("Run one validation pass over a JSON object of field values")
        .arg(arg_form())
        .arg(arg_file())
        .arg(arg_json())
        .after_help(after_help_text(&[
            "agf validate --file values.json     Validate values from a file",
            "echo '{}' | agf validate            Validate an empty submission",
            "agf validate --file v.json --json   Error mapping as JSON",
        ]))
}

fn cmd_submit() -> ClapCommand {
    ClapCommand::new("submit")
        .about("Drive the full controller flow against a stubbed collaborator")
        .arg(arg_form())
        .arg(arg_file())
        .arg(
            Arg::new("outcome")
                .long("outcome")
                .value_name("RESULT")
                .value_parser(["ok", "fail"])
                .default_value("ok")
                .help("Forced collaborator result"),
        )
        .arg(arg_json())
        .after_help(after_help_text(&[
            "agf submit --file values.json              Validate and submit",
            "agf submit --file v.json --outcome fail    Exercise the failure path",
            "agf submit --file v.json --json            Final snapshot as JSON",
        ]))
}

fn cmd_session() -> ClapCommand {
    ClapCommand::new("session")
        .about("Read and write the file-backed session store")
        .subcommand_required(true)
        .subcommand(
            ClapCommand::new("get")
                .about("Print the value cached under a key")
                .arg(Arg::new("key").required(true).help("Session key, e.g. token")),
        )
        .subcommand(
            ClapCommand::new("set")
                .about("Cache a value under a key")
                .arg(Arg::new("key").required(true).help("Session key, e.g. token"))
                .arg(Arg::new("value").required(true).help("Value to cache")),
        )
        .subcommand(ClapCommand::new("clear").about("Drop every cached entry"))
        .after_help(after_help_text(&[
            "agf session set token abc123        Cache a login token",
            "agf session get token               Print the cached token",
            "agf session clear                   Forget the session",
        ]))
}

fn cmd_completions() -> ClapCommand {
    ClapCommand::new("completions")
        .about("Generate shell completions")
        .arg(
            Arg::new("shell")
                .required(true)
                .value_parser(clap::value_parser!(clap_complete::Shell))
                .help("Shell to generate completions for"),
        )
        .after_help(after_help_text(&[
            "agf completions bash > /etc/bash_completion.d/agf",
            "agf completions zsh  > ~/.zfunc/_agf",
        ]))
}

/// Build the top-level `agf` command
#[must_use]
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("agf")
        .about("AgriForm - conditional form-validation engine")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("PATH")
                .help("Path to a TOML config file (overrides the platform default)"),
        )
        .subcommand(cmd_describe())
        .subcommand(cmd_validate())
        .subcommand(cmd_submit())
        .subcommand(cmd_session())
        .subcommand(cmd_completions())
}

/// Parse arguments, load configuration, and dispatch to a subcommand
///
/// # Errors
///
/// Propagates configuration and subcommand failures; `main` maps them to
/// exit codes.
pub async fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    let config_path = matches.get_one::<String>("config").map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    match matches.subcommand() {
        Some(("describe", sub)) => commands::describe::run(&config, sub),
        Some(("validate", sub)) => commands::validate::run(&config, sub),
        Some(("submit", sub)) => commands::submit::run(&config, sub).await,
        Some(("session", sub)) => commands::session::run(&config, sub),
        Some(("completions", sub)) => commands::completions::run(sub),
        _ => anyhow::bail!("no subcommand given"),
    }
}

/// Print a value as pretty JSON on stdout
///
/// # Errors
///
/// Fails when the value cannot be encoded.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to encode JSON output")?;
    #[allow(clippy::print_stdout)]
    {
        println!("{rendered}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_every_subcommand_is_wired() {
        let cli = build_cli();
        let names: Vec<&str> = cli.get_subcommands().map(ClapCommand::get_name).collect();
        assert_eq!(
            names,
            vec!["describe", "validate", "submit", "session", "completions"]
        );
    }

    #[test]
    fn test_after_help_lists_examples() {
        let text = after_help_text(&["agf describe", "agf validate"]);
        assert!(text.starts_with("EXAMPLES:\n"));
        assert!(text.contains("  agf describe\n"));
    }
}
