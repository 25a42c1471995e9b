//! Error types for nut-cli

use nut_vfs::ErrorCode;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from nut-assets
    #[error(transparent)]
    Assets(#[from] nut_assets::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Output serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Logging could not be initialised
    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

impl CliError {
    /// Status code of the underlying asset error, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Assets(e) => Some(e.code()),
            _ => None,
        }
    }
}
