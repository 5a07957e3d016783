//! The boundary to the remote design tool
//!
//! Every remote effect of a sync run goes through [`RemoteDesignClient`].
//! The production adapter lives in `tsync-bridge`; tests use the in-memory
//! fake from `tsync-test-utils`.

use async_trait::async_trait;
use serde_json::Value;

use crate::model::{SetupPayload, Variable};

/// Result type for remote client calls
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Failure of a single remote call.
///
/// The `Display` text is recorded verbatim as the `message` of the
/// corresponding sync error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The bridge could not be reached or exited abnormally
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The remote tool refused the request
    #[error("{message}")]
    Rejected { message: String },

    /// Generated script threw while executing
    #[error("Script failed: {message}")]
    Script { message: String },

    /// The call did not finish in time
    #[error("Timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// The bridge answered with something other than a valid response
    #[error("Protocol error: {message}")]
    Protocol { message: String },
}

impl ClientError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn script(message: impl Into<String>) -> Self {
        Self::Script {
            message: message.into(),
        }
    }
}

/// Operations the sync engine needs from the remote design tool.
///
/// `file_key` is the opaque id of the remote target. Implementations must
/// not retry internally: a returned error is final for that call.
#[async_trait]
pub trait RemoteDesignClient: Send + Sync {
    /// Current variables stored in the remote file
    async fn get_variables(&self, file_key: &str) -> ClientResult<Vec<Variable>>;

    /// Create all `variables` in one call
    async fn batch_create_variables(
        &self,
        file_key: &str,
        variables: &[Variable],
    ) -> ClientResult<()>;

    /// Overwrite all `variables` (matched by name) in one call
    async fn batch_update_variables(
        &self,
        file_key: &str,
        variables: &[Variable],
    ) -> ClientResult<()>;

    /// Run generated scripting code against the remote tool
    async fn execute(&self, file_key: &str, script: &str) -> ClientResult<Value>;

    /// Create every collection, mode and variable atomically
    async fn setup_design_tokens(&self, file_key: &str, payload: &SetupPayload)
    -> ClientResult<()>;
}
