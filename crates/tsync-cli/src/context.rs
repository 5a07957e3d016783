//! Per-invocation command context
//!
//! Resolves the config once and hands commands the pieces they need: the
//! validated token file and an orchestrator wired to the bridge.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tsync_bridge::BridgeClient;
use tsync_core::{SyncOrchestrator, TokenFile};

use crate::config::{Config, Overrides};
use crate::error::Result;

/// Resolved settings for one CLI invocation
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub config: Config,
}

impl CommandContext {
    /// Load the config file and apply overrides
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut config = Config::load(config_path)?;
        config.merge(overrides);
        Ok(Self { config })
    }

    /// Load and validate the token file
    pub fn load_tokens(&self, arg: Option<PathBuf>) -> Result<TokenFile> {
        let path = self.config.tokens_path(arg)?;
        tracing::debug!("Reading tokens from {}", path.display());
        let tokens = TokenFile::load(&path)?;
        tokens.validate()?;
        Ok(tokens)
    }

    /// Build an orchestrator talking to the configured bridge
    pub fn orchestrator(&self) -> Result<SyncOrchestrator> {
        let file_key = self.config.file_key()?;
        let client = BridgeClient::new(self.config.bridge_config());
        Ok(SyncOrchestrator::new(Arc::new(client), file_key))
    }
}

/// Run `future` to completion on a single-threaded runtime
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
