//! Top-level sync entry points
//!
//! The orchestrator sequences one run against a remote file:
//!
//! ```text
//! fetch remote variables
//!   -> drift check (skipped when resuming)
//!   -> variable batches (create, then update)
//!   -> styles (only if every variable batch succeeded)
//!   -> combined SyncResult
//! ```
//!
//! Nothing is remembered between calls. Two runs against the same file
//! must not overlap; that is the caller's responsibility.

use std::collections::HashSet;
use std::sync::Arc;

use crate::client::{ClientResult, RemoteDesignClient};
use crate::drift::{DriftReport, detect_drift};
use crate::model::TokenFile;

use super::batch::BatchSyncEngine;
use super::result::{SyncError, SyncOptions, SyncPhase, SyncResult};
use super::styles::StyleSyncEngine;

/// Engine coordinating a full token sync against one remote file
pub struct SyncOrchestrator {
    client: Arc<dyn RemoteDesignClient>,
    file_key: String,
    variables: BatchSyncEngine,
    styles: StyleSyncEngine,
}

impl SyncOrchestrator {
    /// Create an orchestrator for the remote file `file_key`
    pub fn new(client: Arc<dyn RemoteDesignClient>, file_key: impl Into<String>) -> Self {
        let file_key = file_key.into();
        Self {
            variables: BatchSyncEngine::new(Arc::clone(&client), file_key.clone()),
            styles: StyleSyncEngine::new(Arc::clone(&client), file_key.clone()),
            client,
            file_key,
        }
    }

    pub fn file_key(&self) -> &str {
        &self.file_key
    }

    /// Push `tokens` to the remote file.
    ///
    /// Never fails outright: fetch errors, drift, batch failures and style
    /// failures all come back inside the returned [`SyncResult`].
    pub async fn sync(&self, tokens: &TokenFile, options: &SyncOptions) -> SyncResult {
        tracing::info!("Syncing tokens to {}", self.file_key);

        let current = match self.client.get_variables(&self.file_key).await {
            Ok(vars) => vars,
            Err(e) => {
                // The drift phase owns the initial fetch
                tracing::warn!("Failed to fetch remote variables: {}", e);
                return SyncResult::failure(SyncError::new(
                    SyncPhase::DriftDetection,
                    format!("Failed to fetch current variables: {}", e),
                ));
            }
        };

        if let Some(batch) = options.resume {
            tracing::info!("Resuming from batch {}, skipping drift detection", batch);
        } else {
            let drift = detect_drift(&current, tokens);
            if drift.has_drift {
                if options.force_override {
                    tracing::warn!(
                        "{} variable(s) drifted; overriding as requested",
                        drift.len()
                    );
                } else {
                    tracing::warn!("{} variable(s) drifted; aborting sync", drift.len());
                    let mut result = SyncResult::failure(SyncError::new(
                        SyncPhase::DriftDetection,
                        format!(
                            "{} variable(s) have been edited in Figma since last push",
                            drift.len()
                        ),
                    ));
                    result.drift_detected = Some(drift);
                    return result;
                }
            }
        }

        let variables = tokens.all_variables();
        let variable_result = self
            .variables
            .sync_variables(&variables, &current, options.resume)
            .await;

        if !variable_result.is_ok() {
            return SyncResult::from_variables(variable_result);
        }

        // Remote styles cannot be listed, so every style is treated as new
        let style_result = self.styles.sync_styles(&tokens.styles, &HashSet::new()).await;

        let result = SyncResult::from_variables(variable_result).with_styles(style_result);
        tracing::info!(
            "Sync finished: {} created, {} updated, {} error(s)",
            result.created,
            result.updated,
            result.errors.len()
        );
        result
    }

    /// Initialize an empty remote file.
    ///
    /// Collections, modes and variables are created in one atomic call so the
    /// file is never left half-initialized; styles follow one by one.
    pub async fn initial_setup(&self, tokens: &TokenFile) -> SyncResult {
        let payload = tokens.setup_payload();
        let variable_count: usize = payload.collections.iter().map(|c| c.variables.len()).sum();

        tracing::info!(
            "Initial setup of {}: {} collection(s), {} variable(s)",
            self.file_key,
            payload.collections.len(),
            variable_count
        );

        if let Err(e) = self
            .client
            .setup_design_tokens(&self.file_key, &payload)
            .await
        {
            tracing::warn!("Initial setup failed: {}", e);
            return SyncResult::failure(SyncError::new(SyncPhase::InitialSetup, e.to_string()));
        }

        let style_result = self.styles.sync_styles(&tokens.styles, &HashSet::new()).await;

        SyncResult {
            success: true,
            created: variable_count,
            updated: 0,
            deleted: 0,
            errors: Vec::new(),
            drift_detected: None,
        }
        .with_styles(style_result)
    }

    /// Fetch remote variables and compare them against `tokens` without writing
    pub async fn check_drift(&self, tokens: &TokenFile) -> ClientResult<DriftReport> {
        let current = self.client.get_variables(&self.file_key).await?;
        Ok(detect_drift(&current, tokens))
    }
}
