//! Error types for tsync-core

use std::path::PathBuf;

/// Result type for tsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading or validating the expected token state.
///
/// Sync runs themselves never return these: failures during `sync` and
/// `initial_setup` are captured into [`crate::SyncResult`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Token file not found at the given path
    #[error("Token file not found at {path}")]
    TokenFileNotFound { path: PathBuf },

    /// Two variables share a name across the token file's collections
    #[error("Duplicate variable name: {name}")]
    DuplicateVariable { name: String },

    /// Two styles share a name
    #[error("Duplicate style name: {name}")]
    DuplicateStyle { name: String },

    /// A collection declares no modes, or a variable uses a mode the collection lacks
    #[error("Invalid collection {collection}: {message}")]
    InvalidCollection { collection: String, message: String },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
