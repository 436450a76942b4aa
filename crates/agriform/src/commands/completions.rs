//! `agf completions` - shell completion generation

use std::io;

use anyhow::Result;
use clap::ArgMatches;
use clap_complete::{generate, Shell};

use crate::cli::build_cli;

/// Run `agf completions <shell>`
///
/// # Errors
///
/// Fails when the shell argument is missing (clap enforces presence, so
/// this indicates a wiring defect).
pub fn run(matches: &ArgMatches) -> Result<()> {
    let shell = matches
        .get_one::<Shell>("shell")
        .copied()
        .ok_or_else(|| anyhow::anyhow!("no shell given"))?;

    let mut cli = build_cli();
    generate(shell, &mut cli, "agf", &mut io::stdout());
    Ok(())
}
