//! Error types for nut-vfs

use std::fmt;
use std::path::PathBuf;

use crate::VfsPath;

/// Result type for nut-vfs operations
pub type Result<T> = std::result::Result<T, Error>;

/// The closed set of status codes surfaced to callers.
///
/// Success is `Ok(..)`; every failure maps onto exactly one of these codes
/// so callers can tell "nothing here" (`NotFound`) from "here but broken"
/// (`MissingFiles`, `InvalidFormat`, `UnknownFormat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    GenericError,
    NotFound,
    NotExist,
    AlreadyExist,
    AccessDenied,
    InvalidName,
    NotSupported,
    InvalidMountPoint,
    InvalidMountTarget,
    NotDirectory,
    InvalidFormat,
    UnknownFormat,
    MissingFiles,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 13] = [
        Self::GenericError,
        Self::NotFound,
        Self::NotExist,
        Self::AlreadyExist,
        Self::AccessDenied,
        Self::InvalidName,
        Self::NotSupported,
        Self::InvalidMountPoint,
        Self::InvalidMountTarget,
        Self::NotDirectory,
        Self::InvalidFormat,
        Self::UnknownFormat,
        Self::MissingFiles,
    ];

    /// Get the string representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenericError => "genericError",
            Self::NotFound => "notFound",
            Self::NotExist => "notExist",
            Self::AlreadyExist => "alreadyExist",
            Self::AccessDenied => "accessDenied",
            Self::InvalidName => "invalidName",
            Self::NotSupported => "notSupported",
            Self::InvalidMountPoint => "invalidMountPoint",
            Self::InvalidMountTarget => "invalidMountTarget",
            Self::NotDirectory => "notDirectory",
            Self::InvalidFormat => "invalidFormat",
            Self::UnknownFormat => "unknownFormat",
            Self::MissingFiles => "missingFiles",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur in virtual filesystem operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not found: {path}")]
    NotFound { path: VfsPath },

    #[error("Access denied: {path}")]
    AccessDenied { path: VfsPath },

    #[error("Not a directory: {}", path.display())]
    NotDirectory { path: PathBuf },

    #[error("Invalid mount point name: '{name}'")]
    InvalidMountPoint { name: String },

    #[error("Invalid target for mount point '{name}': {}", target.display())]
    InvalidMountTarget { name: String, target: PathBuf },

    #[error("Mount point already exists: {name}")]
    AlreadyExist { name: String },

    #[error("File is not valid UTF-8 text: {path}")]
    InvalidEncoding { path: VfsPath },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Map this error onto the closed status-code set.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::AccessDenied { .. } => ErrorCode::AccessDenied,
            Self::NotDirectory { .. } => ErrorCode::NotDirectory,
            Self::InvalidMountPoint { .. } => ErrorCode::InvalidMountPoint,
            Self::InvalidMountTarget { .. } => ErrorCode::InvalidMountTarget,
            Self::AlreadyExist { .. } => ErrorCode::AlreadyExist,
            Self::InvalidEncoding { .. } => ErrorCode::InvalidFormat,
            Self::Io { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::NotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::AccessDenied,
                std::io::ErrorKind::AlreadyExists => ErrorCode::AlreadyExist,
                _ => ErrorCode::GenericError,
            },
        }
    }
}
