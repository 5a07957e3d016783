//! Sync engines for pushing expected token state to the remote tool
//!
//! This module provides:
//! - **batch**: Chunked, resumable, stop-on-first-failure variable writes
//! - **styles**: One-at-a-time scripted style writes that continue past failures
//! - **orchestrator**: `sync` and `initial_setup` entry points
//! - **result**: Result, error and option types shared by the engines

mod batch;
mod orchestrator;
mod result;
mod styles;

pub use batch::BatchSyncEngine;
pub use orchestrator::SyncOrchestrator;
pub use result::{
    StyleSyncResult, SyncError, SyncOptions, SyncPhase, SyncResult, VariableSyncResult,
};
pub use styles::StyleSyncEngine;
