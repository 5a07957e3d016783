//! Token Sync CLI
//!
//! Pushes design tokens from a local token file to a remote design file.
//!
//! Exit codes: 0 on success, 1 on error, 2 when a run completed but did not
//! succeed (batch failure, style failure, or drift).

mod cli;
mod commands;
mod config;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use config::Overrides;
use context::CommandContext;
use error::Result;

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow(), e);
    }
    tracing::debug!("Running {:?}", cli.command);

    let overrides = Overrides {
        file_key: cli.file_key,
        bridge: cli.bridge,
    };
    let ctx = CommandContext::load(cli.config.as_deref(), &overrides)?;

    execute_command(&ctx, cli.command)
}

fn execute_command(ctx: &CommandContext, cmd: Commands) -> Result<bool> {
    match cmd {
        Commands::Sync {
            tokens,
            force,
            resume,
            json,
        } => commands::run_sync(ctx, tokens, force, resume, json),
        Commands::Setup { tokens, json } => commands::run_setup(ctx, tokens, json),
        Commands::Check { tokens, json } => commands::run_check(ctx, tokens, json),
    }
}
