//! Sync command implementation
//!
//! Pushes the token file and renders the combined result.

use std::path::PathBuf;

use colored::Colorize;

use tsync_core::{SyncOptions, SyncPhase, SyncResult};

use crate::context::{CommandContext, block_on};
use crate::error::Result;

/// Run the sync command
///
/// Returns whether the run succeeded; failures inside the run are reported,
/// not raised.
pub fn run_sync(
    ctx: &CommandContext,
    tokens: Option<PathBuf>,
    force: bool,
    resume: Option<usize>,
    json: bool,
) -> Result<bool> {
    let tokens = ctx.load_tokens(tokens)?;
    let orchestrator = ctx.orchestrator()?;
    let options = SyncOptions {
        force_override: force,
        resume,
    };

    if !json {
        println!(
            "{} Syncing tokens to {}...",
            "=>".blue().bold(),
            orchestrator.file_key().cyan()
        );
        if let Some(batch) = resume {
            println!(
                "   {} resuming from batch {}, drift check skipped",
                "!".yellow(),
                batch
            );
        }
    }

    let result = block_on(orchestrator.sync(&tokens, &options))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(result.success)
}

/// Print a human-readable summary of a sync or setup result
pub fn print_result(result: &SyncResult) {
    if let Some(drift) = &result.drift_detected {
        println!(
            "{} {} variable(s) changed remotely since the last push:",
            "DRIFTED".red().bold(),
            drift.len()
        );
        for item in &drift.drifted_variables {
            let actual = item
                .actual_value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "<unset>".to_string());
            println!(
                "   {} {} ({}): expected {}, found {}",
                "!".red(),
                item.name.cyan(),
                item.mode.dimmed(),
                item.expected_value,
                actual
            );
        }
        println!();
        println!("Run {} to overwrite.", "tsync sync --force".cyan());
        return;
    }

    for error in &result.errors {
        println!("   {} {}", "!".red(), error);
    }

    if result.success {
        println!(
            "{} {} created, {} updated",
            "OK".green().bold(),
            result.created,
            result.updated
        );
        return;
    }

    println!(
        "{} {} created, {} updated, {} error(s)",
        "FAILED".red().bold(),
        result.created,
        result.updated,
        result.errors.len()
    );

    if let Some(command) = retry_command(result) {
        println!();
        println!("Fix the cause and run {} to continue.", command.cyan());
    }
}

/// Command that continues a run stopped by a failed variable batch.
///
/// Update batches resume by number. After a failed create batch the
/// variables already created are matched as existing on the next run, so a
/// plain rerun picks up where the create phase stopped.
pub fn retry_command(result: &SyncResult) -> Option<String> {
    let error = result.errors.iter().find(|e| {
        matches!(
            e.phase,
            SyncPhase::VariablesCreate | SyncPhase::VariablesUpdate
        )
    })?;
    match (error.phase, error.batch) {
        (SyncPhase::VariablesUpdate, Some(batch)) => {
            Some(format!("tsync sync --resume {}", batch))
        }
        _ => Some("tsync sync".to_string()),
    }
}
