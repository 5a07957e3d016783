//! Chunked, resumable variable writes
//!
//! Variables are split into a create set and an update set by name against
//! the current remote state, then written in batches of [`BATCH_SIZE`].
//! Batches run strictly in order and the first failing batch ends its phase:
//! batch N+1 is never sent after batch N failed, which is what makes a
//! resume index meaningful.

use std::collections::HashSet;
use std::sync::Arc;

use crate::chunk::{BATCH_SIZE, batch_count, chunk};
use crate::client::RemoteDesignClient;
use crate::model::Variable;

use super::result::{SyncError, SyncPhase, VariableSyncResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchKind {
    Create,
    Update,
}

impl BatchKind {
    fn phase(self) -> SyncPhase {
        match self {
            BatchKind::Create => SyncPhase::VariablesCreate,
            BatchKind::Update => SyncPhase::VariablesUpdate,
        }
    }
}

/// Writes variables to the remote file in fixed-size batches
pub struct BatchSyncEngine {
    client: Arc<dyn RemoteDesignClient>,
    file_key: String,
}

impl BatchSyncEngine {
    /// Create an engine writing to `file_key` through `client`
    pub fn new(client: Arc<dyn RemoteDesignClient>, file_key: impl Into<String>) -> Self {
        Self {
            client,
            file_key: file_key.into(),
        }
    }

    /// Create missing variables, then update existing ones.
    ///
    /// A variable goes to the update set when its name exists remotely,
    /// whether or not its values changed. Updates are skipped entirely when
    /// any create batch failed.
    ///
    /// `resume` is one global 1-indexed batch number spanning the create
    /// batches first and the update batches after them.
    pub async fn sync_variables(
        &self,
        variables: &[Variable],
        current: &[Variable],
        resume: Option<usize>,
    ) -> VariableSyncResult {
        let existing: HashSet<&str> = current.iter().map(|v| v.name.as_str()).collect();
        let (to_update, to_create): (Vec<Variable>, Vec<Variable>) = variables
            .iter()
            .cloned()
            .partition(|v| existing.contains(v.name.as_str()));

        tracing::debug!(
            "Partitioned {} variables: {} to create, {} to update",
            variables.len(),
            to_create.len(),
            to_update.len()
        );

        let created = self.batch_create_variables(&to_create, resume).await;
        if !created.errors.is_empty() {
            return VariableSyncResult {
                created: created.created,
                updated: 0,
                errors: created.errors,
            };
        }

        // The create phase owns the first `batch_count(to_create)` global indices
        let update_start =
            resume.map(|batch| batch.saturating_sub(batch_count(to_create.len())).max(1));
        let updated = self.batch_update_variables(&to_update, update_start).await;

        VariableSyncResult {
            created: created.created,
            updated: updated.updated,
            errors: updated.errors,
        }
    }

    /// Create `variables` batch by batch, starting at 1-indexed `start_batch`
    pub async fn batch_create_variables(
        &self,
        variables: &[Variable],
        start_batch: Option<usize>,
    ) -> VariableSyncResult {
        let (written, errors) = self
            .run_batches(BatchKind::Create, variables, start_batch)
            .await;
        VariableSyncResult {
            created: written,
            updated: 0,
            errors,
        }
    }

    /// Update `variables` batch by batch, starting at 1-indexed `start_batch`
    pub async fn batch_update_variables(
        &self,
        variables: &[Variable],
        start_batch: Option<usize>,
    ) -> VariableSyncResult {
        let (written, errors) = self
            .run_batches(BatchKind::Update, variables, start_batch)
            .await;
        VariableSyncResult {
            created: 0,
            updated: written,
            errors,
        }
    }

    async fn run_batches(
        &self,
        kind: BatchKind,
        variables: &[Variable],
        start_batch: Option<usize>,
    ) -> (usize, Vec<SyncError>) {
        if variables.is_empty() {
            return (0, Vec::new());
        }

        let phase = kind.phase();
        let batches = chunk(variables, BATCH_SIZE);
        let total = batches.len();
        let start = start_batch.unwrap_or(1).max(1);

        if start > 1 {
            tracing::info!(
                "{}: resuming at batch {}/{}, skipping {} already applied",
                phase,
                start,
                total,
                (start - 1).min(total)
            );
        }

        let mut written = 0;
        for (index, batch) in batches.into_iter().enumerate() {
            let number = index + 1;
            if number < start {
                continue;
            }

            tracing::debug!(
                "{}: sending batch {}/{} ({} variables)",
                phase,
                number,
                total,
                batch.len()
            );

            let outcome = match kind {
                BatchKind::Create => {
                    self.client
                        .batch_create_variables(&self.file_key, batch)
                        .await
                }
                BatchKind::Update => {
                    self.client
                        .batch_update_variables(&self.file_key, batch)
                        .await
                }
            };

            if let Err(e) = outcome {
                tracing::warn!("{}: batch {}/{} failed: {}", phase, number, total, e);
                return (
                    written,
                    vec![SyncError::batch(phase, number, total, e.to_string())],
                );
            }

            written += batch.len();
        }

        tracing::info!("{}: wrote {} variables", phase, written);
        (written, Vec::new())
    }
}
