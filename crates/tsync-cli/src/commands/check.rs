//! Check command implementation
//!
//! Read-only: fetches remote variables and reports drift without writing.

use std::path::PathBuf;

use colored::Colorize;

use crate::context::{CommandContext, block_on};
use crate::error::Result;

/// Run the check command
///
/// Returns `true` when the remote file matches the token file.
pub fn run_check(ctx: &CommandContext, tokens: Option<PathBuf>, json: bool) -> Result<bool> {
    let tokens = ctx.load_tokens(tokens)?;
    let orchestrator = ctx.orchestrator()?;

    if !json {
        println!(
            "{} Checking {} for remote edits...",
            "=>".blue().bold(),
            orchestrator.file_key().cyan()
        );
    }

    let report = block_on(orchestrator.check_drift(&tokens))??;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(!report.has_drift);
    }

    if !report.has_drift {
        println!("{} No drift detected.", "OK".green().bold());
        return Ok(true);
    }

    println!(
        "{} {} variable(s) changed remotely:",
        "DRIFTED".red().bold(),
        report.len()
    );
    for item in &report.drifted_variables {
        match &item.actual_value {
            Some(actual) => println!(
                "   {} {} ({}): expected {}, found {}",
                "!".red(),
                item.name.cyan(),
                item.mode.dimmed(),
                item.expected_value,
                actual
            ),
            None => println!(
                "   {} {} ({}): expected {}, mode unset",
                "!".red(),
                item.name.cyan(),
                item.mode.dimmed(),
                item.expected_value
            ),
        }
    }
    println!();
    println!("Run {} to overwrite.", "tsync sync --force".cyan());

    Ok(false)
}
