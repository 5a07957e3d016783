//! Setup command implementation

use std::path::PathBuf;

use colored::Colorize;

use crate::commands::sync::print_result;
use crate::context::{CommandContext, block_on};
use crate::error::Result;

/// Run the setup command
///
/// Creates every collection, mode and variable in one call, then the styles.
pub fn run_setup(ctx: &CommandContext, tokens: Option<PathBuf>, json: bool) -> Result<bool> {
    let tokens = ctx.load_tokens(tokens)?;
    let orchestrator = ctx.orchestrator()?;

    if !json {
        println!(
            "{} Initializing {} with {} collection(s)...",
            "=>".blue().bold(),
            orchestrator.file_key().cyan(),
            tokens.collections.len()
        );
    }

    let result = block_on(orchestrator.initial_setup(&tokens))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    Ok(result.success)
}
