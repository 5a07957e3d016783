//! Design token sync engine
//!
//! This crate reconciles a locally computed token state with the state stored
//! in a remote design tool, implementing:
//!
//! - **Drift detection**: Refuse to overwrite variables edited remotely since the last push
//! - **Batched variable sync**: Create/update split by name, fixed-size batches, resumable
//! - **Style sync**: Per-item scripted create/update that tolerates individual failures
//! - **Orchestration**: `sync` and `initial_setup` entry points returning one [`SyncResult`]
//!
//! # Architecture
//!
//! All remote effects go through the [`RemoteDesignClient`] trait, injected
//! into the engines:
//!
//! ```text
//!                 SyncOrchestrator
//!                        |
//!       +----------------+----------------+
//!       |                |                |
//! detect_drift    BatchSyncEngine   StyleSyncEngine
//!                        |                |
//!                      chunk       script (IR -> render)
//!                        |                |
//!                        +-- RemoteDesignClient --+
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tsync_core::{SyncOptions, SyncOrchestrator, TokenFile};
//!
//! async fn push(client: Arc<dyn tsync_core::RemoteDesignClient>) {
//!     let tokens = TokenFile::load("tokens.json".as_ref()).unwrap();
//!     let orchestrator = SyncOrchestrator::new(client, "AbCdEf123");
//!     let result = orchestrator.sync(&tokens, &SyncOptions::default()).await;
//!     assert!(result.success);
//! }
//! ```

pub mod chunk;
pub mod client;
pub mod drift;
pub mod error;
pub mod model;
pub mod script;
pub mod sync;

pub use chunk::{BATCH_SIZE, batch_count, chunk};
pub use client::{ClientError, ClientResult, RemoteDesignClient};
pub use drift::{DriftReport, DriftedVariable, detect_drift};
pub use error::{Error, Result};
pub use model::{
    Collection, Effect, EffectProperties, EffectType, Offset, ResolvedType, Rgba, SetupPayload,
    Style, StyleKind, StyleProperties, TextProperties, TokenFile, TokenValue, Variable,
};
pub use script::{
    FontName, Instruction, StyleAction, StyleOperation, font_style_for_weight,
    generate_style_plugin_code,
};
pub use sync::{
    BatchSyncEngine, StyleSyncEngine, StyleSyncResult, SyncError, SyncOptions, SyncOrchestrator,
    SyncPhase, SyncResult, VariableSyncResult,
};
