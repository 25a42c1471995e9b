//! Virtual filesystem abstraction for nut asset loading
//!
//! Asset resolution never touches the host filesystem directly. Everything
//! goes through the capability traits in [`provider`], addressed by rooted
//! [`VfsPath`]s. Two adapters are provided: [`MemoryFs`] keeps files in
//! memory, [`MountedFs`] maps named mount points onto host directories.

pub mod app_paths;
pub mod error;
pub mod memory;
pub mod mounted;
pub mod path;
pub mod provider;

pub use app_paths::{HostAppPaths, StaticAppPaths};
pub use error::{Error, ErrorCode, Result};
pub use memory::MemoryFs;
pub use mounted::MountedFs;
pub use path::VfsPath;
pub use provider::{AppPaths, FileSystem, MountKind, MountPoint, VirtualFs};
