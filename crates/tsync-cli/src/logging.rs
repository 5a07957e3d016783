//! Log output for the CLI
//!
//! Logs go to stderr so `--json` output on stdout stays machine-readable.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Pick the log filter: `-v` means debug, otherwise `RUST_LOG` or "info"
fn filter(verbose: bool) -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
    if verbose {
        return Ok(EnvFilter::try_new("debug")?);
    }
    Ok(EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?)
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact();

    tracing_subscriber::registry()
        .with(filter(verbose)?)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
