//! Mount-table backed virtual filesystem over the host filesystem

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::provider::validate_mount_name;
use crate::{Error, FileSystem, MountKind, MountPoint, Result, VfsPath, VirtualFs};

/// Production virtual filesystem.
///
/// The first component of a [`VfsPath`] selects a mount point; the rest is
/// resolved below the mount's host directory. File mounts only match their
/// exact name. Mount names compare case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct MountedFs {
    /// Keyed by lower-cased mount name
    mounts: BTreeMap<String, MountPoint>,
}

impl MountedFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered mount points, ordered by name.
    pub fn mount_points(&self) -> impl Iterator<Item = &MountPoint> {
        self.mounts.values()
    }

    /// Translate a virtual path into the host path backing it.
    pub fn resolve(&self, path: &VfsPath) -> Option<PathBuf> {
        let mut components = path.components();
        let mount = self.mounts.get(&components.next()?.to_lowercase())?;
        match mount.kind {
            MountKind::File => components.next().is_none().then(|| mount.target.clone()),
            MountKind::Directory => {
                let mut host = mount.target.clone();
                host.extend(components);
                Some(host)
            }
        }
    }

    fn insert(&mut self, name: &str, target: PathBuf, kind: MountKind) {
        self.mounts.insert(
            name.to_lowercase(),
            MountPoint {
                name: name.to_string(),
                target,
                kind,
            },
        );
    }
}

impl FileSystem for MountedFs {
    fn is_file_exist_and_readable(&self, path: &VfsPath) -> bool {
        let Some(host) = self.resolve(path) else {
            return false;
        };
        host.is_file() && File::open(&host).is_ok()
    }

    fn is_directory(&self, path: &VfsPath) -> bool {
        if path.is_root() {
            return true;
        }
        self.resolve(path).is_some_and(|host| host.is_dir())
    }

    fn read_data_file(&self, path: &VfsPath) -> Result<Vec<u8>> {
        let host = self
            .resolve(path)
            .ok_or_else(|| Error::NotFound { path: path.clone() })?;
        fs::read(&host).map_err(|e| Error::io(host, e))
    }
}

impl VirtualFs for MountedFs {
    fn clear_mounts(&mut self) {
        self.mounts.clear();
    }

    fn add_mount_point_ex(&mut self, name: &str, target: &Path, kind: MountKind) -> Result<()> {
        validate_mount_name(name)?;
        if self.mounts.contains_key(&name.to_lowercase()) {
            return Err(Error::AlreadyExist {
                name: name.to_string(),
            });
        }
        if target.as_os_str().is_empty() {
            return Err(Error::InvalidMountTarget {
                name: name.to_string(),
                target: target.to_path_buf(),
            });
        }
        if kind == MountKind::Directory && target.is_file() {
            return Err(Error::NotDirectory {
                path: target.to_path_buf(),
            });
        }
        let target = dunce::simplified(target).to_path_buf();
        tracing::debug!(name, target = %target.display(), ?kind, "Adding mount point");
        self.insert(name, target, kind);
        Ok(())
    }

    #[cfg(not(windows))]
    fn create_machine_filesystem_mount_points(&mut self, root_name: &str) -> Result<()> {
        self.add_mount_point_ex(root_name, Path::new("/"), MountKind::Directory)
    }

    #[cfg(windows)]
    fn create_machine_filesystem_mount_points(&mut self, _root_name: &str) -> Result<()> {
        let drives: Vec<(String, PathBuf)> = (b'A'..=b'Z')
            .map(|letter| {
                let name = (letter as char).to_ascii_lowercase().to_string();
                (name, PathBuf::from(format!("{}:\\", letter as char)))
            })
            .filter(|(_, drive)| drive.exists())
            .collect();
        if let Some((name, _)) = drives.iter().find(|(name, _)| self.mounts.contains_key(name)) {
            return Err(Error::AlreadyExist { name: name.clone() });
        }
        for (name, drive) in drives {
            self.insert(&name, drive, MountKind::Directory);
        }
        Ok(())
    }

    fn probe_target(&self, target: &Path) -> Option<MountKind> {
        let meta = fs::metadata(target).ok()?;
        Some(if meta.is_dir() {
            MountKind::Directory
        } else {
            MountKind::File
        })
    }
}
