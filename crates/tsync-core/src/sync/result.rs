//! Result and error types reported by sync runs
//!
//! These are plain values consumed by a reporting layer. Every error carries
//! its phase and, for batched phases, the failing batch and batch total so a
//! resume command can be built from it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drift::DriftReport;

/// Stage of a sync run an error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncPhase {
    #[serde(rename = "drift-detection")]
    DriftDetection,
    #[serde(rename = "variables:create")]
    VariablesCreate,
    #[serde(rename = "variables:update")]
    VariablesUpdate,
    #[serde(rename = "styles")]
    Styles,
    #[serde(rename = "initial-setup")]
    InitialSetup,
}

impl SyncPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncPhase::DriftDetection => "drift-detection",
            SyncPhase::VariablesCreate => "variables:create",
            SyncPhase::VariablesUpdate => "variables:update",
            SyncPhase::Styles => "styles",
            SyncPhase::InitialSetup => "initial-setup",
        }
    }
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure captured during a sync run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncError {
    pub phase: SyncPhase,
    /// 1-indexed batch that failed, for batched phases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_batches: Option<usize>,
    pub message: String,
}

impl SyncError {
    pub fn new(phase: SyncPhase, message: impl Into<String>) -> Self {
        Self {
            phase,
            batch: None,
            total_batches: None,
            message: message.into(),
        }
    }

    /// Error for batch `batch` of `total_batches`
    pub fn batch(
        phase: SyncPhase,
        batch: usize,
        total_batches: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            batch: Some(batch),
            total_batches: Some(total_batches),
            message: message.into(),
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.batch, self.total_batches) {
            (Some(batch), Some(total)) => write!(
                f,
                "[{}] batch {}/{}: {}",
                self.phase, batch, total, self.message
            ),
            _ => write!(f, "[{}] {}", self.phase, self.message),
        }
    }
}

/// Outcome of the variable phases
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariableSyncResult {
    pub created: usize,
    pub updated: usize,
    pub errors: Vec<SyncError>,
}

impl VariableSyncResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of the style phase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleSyncResult {
    pub created: usize,
    pub updated: usize,
    pub errors: Vec<SyncError>,
}

/// Combined outcome of a `sync` or `initial_setup` call
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResult {
    pub success: bool,
    pub created: usize,
    pub updated: usize,
    /// Remote-only items are never removed, so this is always 0
    pub deleted: usize,
    pub errors: Vec<SyncError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_detected: Option<DriftReport>,
}

impl SyncResult {
    /// A failed result carrying a single error and zero counts
    pub fn failure(error: SyncError) -> Self {
        Self {
            success: false,
            errors: vec![error],
            ..Self::default()
        }
    }

    /// Result of a run that stopped after the variable phases
    pub fn from_variables(variables: VariableSyncResult) -> Self {
        Self {
            success: variables.errors.is_empty(),
            created: variables.created,
            updated: variables.updated,
            deleted: 0,
            errors: variables.errors,
            drift_detected: None,
        }
    }

    /// Fold style results in; success is recomputed over all errors
    pub fn with_styles(mut self, styles: StyleSyncResult) -> Self {
        self.created += styles.created;
        self.updated += styles.updated;
        self.errors.extend(styles.errors);
        self.success = self.errors.is_empty();
        self
    }
}

/// Options for a `sync` call
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Push even when the remote state has drifted
    pub force_override: bool,
    /// Global 1-indexed batch to resume from; skips drift detection.
    ///
    /// Batches are numbered across the create phase first, then the update
    /// phase. `Some(0)` behaves like `Some(1)`.
    pub resume: Option<usize>,
}
