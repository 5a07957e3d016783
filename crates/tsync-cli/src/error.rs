//! Error types for tsync-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from tsync-core (token file loading and validation)
    #[error(transparent)]
    Core(#[from] tsync_core::Error),

    /// A remote call made outside a sync run failed
    #[error(transparent)]
    Client(#[from] tsync_core::ClientError),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    /// JSON output could not be produced
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
