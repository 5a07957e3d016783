//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Token Sync - Push design tokens to a remote design file
#[derive(Parser, Debug)]
#[command(name = "tsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (defaults to ./tsync.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Remote file key
    #[arg(long, global = true, env = "TSYNC_FILE_KEY")]
    pub file_key: Option<String>,

    /// Bridge executable
    #[arg(long, global = true, env = "TSYNC_BRIDGE")]
    pub bridge: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Push variables and styles to the remote file
    ///
    /// Refuses to run when remote variables were edited since the last push,
    /// unless --force is given.
    ///
    /// Examples:
    ///   tsync sync tokens.json             # Normal push
    ///   tsync sync tokens.json --force     # Overwrite remote edits
    ///   tsync sync tokens.json --resume 3  # Continue from batch 3
    Sync {
        /// Token file (defaults to `tokens` in tsync.toml)
        tokens: Option<PathBuf>,

        /// Overwrite variables edited remotely since the last push
        #[arg(long)]
        force: bool,

        /// Resume from this 1-indexed batch; skips drift detection
        #[arg(long, value_parser = clap::value_parser!(usize))]
        resume: Option<usize>,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize an empty remote file in one atomic call
    Setup {
        /// Token file (defaults to `tokens` in tsync.toml)
        tokens: Option<PathBuf>,

        /// Output the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report remote edits without writing anything
    Check {
        /// Token file (defaults to `tokens` in tsync.toml)
        tokens: Option<PathBuf>,

        /// Output the drift report as JSON
        #[arg(long)]
        json: bool,
    },
}
