//! Capability traits consumed by asset resolution

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{Error, Result, VfsPath};

/// What a mount point maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MountKind {
    /// A host directory; the mount name becomes a top-level virtual directory
    Directory,
    /// A single host file exposed under the mount name
    File,
}

/// A registered mount point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MountPoint {
    /// Top-level virtual name (`nuts` exposes `/nuts/...`)
    pub name: String,
    /// Host location backing the mount
    pub target: PathBuf,
    pub kind: MountKind,
}

/// Read access to the virtual filesystem.
///
/// Implementations must be safe for concurrent reads if callers resolve
/// projects from several threads; no internal locking is assumed.
pub trait FileSystem: Send + Sync {
    /// Check that `path` names a regular file that can be opened for reading.
    fn is_file_exist_and_readable(&self, path: &VfsPath) -> bool;

    /// Check that `path` names a directory.
    fn is_directory(&self, path: &VfsPath) -> bool;

    /// Read a file as raw bytes.
    fn read_data_file(&self, path: &VfsPath) -> Result<Vec<u8>>;

    /// Read a file as UTF-8 text. A leading byte order mark is dropped.
    fn read_text_file(&self, path: &VfsPath) -> Result<String> {
        let data = self.read_data_file(path)?;
        let mut text = String::from_utf8(data).map_err(|_| Error::InvalidEncoding {
            path: path.clone(),
        })?;
        if text.starts_with('\u{feff}') {
            text.remove(0);
        }
        Ok(text)
    }
}

/// Mount table mutation.
pub trait VirtualFs {
    /// Drop every mount point.
    fn clear_mounts(&mut self);

    /// Register a directory mount.
    fn add_mount_point(&mut self, name: &str, target: &Path) -> Result<()> {
        self.add_mount_point_ex(name, target, MountKind::Directory)
    }

    /// Register a mount point of an explicit kind.
    fn add_mount_point_ex(&mut self, name: &str, target: &Path, kind: MountKind) -> Result<()>;

    /// Expose the host machine's filesystem roots.
    ///
    /// On Unix the host `/` is mounted as `root_name`; on Windows every
    /// present drive is mounted under its lower-case letter. Fails with
    /// `AlreadyExist` if any of those names is taken.
    fn create_machine_filesystem_mount_points(&mut self, root_name: &str) -> Result<()>;

    /// Inspect a host location; `None` when nothing exists there.
    fn probe_target(&self, target: &Path) -> Option<MountKind>;
}

/// Application directory discovery.
///
/// The `create` flag asks the provider to create the directory on first
/// use. `None` means the location could not be determined (or created).
pub trait AppPaths {
    fn app_name(&self) -> Option<String>;

    fn app_root_path(&self) -> Option<PathBuf>;

    fn app_home_path(&self, create: bool) -> Option<PathBuf>;

    fn app_temp_path(&self, create: bool) -> Option<PathBuf>;

    fn app_logs_path(&self, create: bool) -> Option<PathBuf>;
}

/// Validate a mount point name: non-empty, no separators, not `.`/`..`.
pub(crate) fn validate_mount_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if invalid {
        return Err(Error::InvalidMountPoint {
            name: name.to_string(),
        });
    }
    Ok(())
}
