//! Error types for nut-assets

use nut_vfs::{ErrorCode, VfsPath};

use crate::document::FormatDiagnostic;
use crate::mounts::MountStep;

/// Result type for nut-assets operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving projects and manifests
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested document or descriptor does not exist
    #[error("Not found: {path}")]
    NotFound { path: VfsPath },

    /// The document parsed but does not have the expected shape
    #[error("Invalid format in {path}: {message}")]
    InvalidFormat { path: VfsPath, message: String },

    /// Neither the JSON nor the YAML reader accepted the text
    #[error("Unknown format in {path}: {diagnostic}")]
    UnknownFormat {
        path: VfsPath,
        diagnostic: Box<FormatDiagnostic>,
    },

    /// A project descriptor references a file that cannot be read
    #[error("Project {project} references missing file {file}")]
    MissingFiles { project: VfsPath, file: VfsPath },

    /// No mount target configured and none available from the app paths
    #[error("Cannot determine a target for the {step} mount")]
    MountTargetUnavailable { step: MountStep },

    /// The virtual filesystem refused a mount
    #[error("Mount step '{step}' failed: {source}")]
    MountFailed {
        step: MountStep,
        #[source]
        source: nut_vfs::Error,
    },

    /// Filesystem error from nut-vfs
    #[error(transparent)]
    Vfs(#[from] nut_vfs::Error),
}

impl Error {
    pub fn invalid_format(path: &VfsPath, message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.clone(),
            message: message.into(),
        }
    }

    /// Map this error onto the closed status-code set.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            Self::UnknownFormat { .. } => ErrorCode::UnknownFormat,
            Self::MissingFiles { .. } => ErrorCode::MissingFiles,
            Self::MountTargetUnavailable { .. } => ErrorCode::InvalidMountTarget,
            Self::MountFailed { source, .. } => source.code(),
            Self::Vfs(e) => e.code(),
        }
    }
}
