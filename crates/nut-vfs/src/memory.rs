//! In-memory virtual filesystem
//!
//! Holds file contents keyed by [`VfsPath`] and records mount table
//! mutations instead of touching the host. Host locations that mount probes
//! should see are declared up front with [`MemoryFs::add_host_entry`].

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::provider::validate_mount_name;
use crate::{Error, FileSystem, MountKind, MountPoint, Result, VfsPath, VirtualFs};

/// In-memory file store and mount recorder.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: BTreeMap<VfsPath, Vec<u8>>,
    unreadable: HashSet<VfsPath>,
    mounts: Vec<MountPoint>,
    host_entries: BTreeMap<PathBuf, MountKind>,
    machine_mounts: bool,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryFs::insert_file`].
    pub fn with_file(mut self, path: impl Into<VfsPath>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert_file(path, contents);
        self
    }

    /// Store a file, replacing any previous contents.
    pub fn insert_file(&mut self, path: impl Into<VfsPath>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    pub fn remove_file(&mut self, path: &VfsPath) -> bool {
        self.files.remove(path).is_some()
    }

    /// Keep the file listed but make every read of it fail.
    pub fn set_unreadable(&mut self, path: impl Into<VfsPath>) {
        self.unreadable.insert(path.into());
    }

    /// Declare a host location visible to [`VirtualFs::probe_target`].
    pub fn add_host_entry(&mut self, target: impl Into<PathBuf>, kind: MountKind) {
        self.host_entries.insert(target.into(), kind);
    }

    /// Mount points registered so far, in registration order.
    pub fn mount_points(&self) -> &[MountPoint] {
        &self.mounts
    }

    pub fn machine_mounts_created(&self) -> bool {
        self.machine_mounts
    }
}

impl FileSystem for MemoryFs {
    fn is_file_exist_and_readable(&self, path: &VfsPath) -> bool {
        self.files.contains_key(path) && !self.unreadable.contains(path)
    }

    fn is_directory(&self, path: &VfsPath) -> bool {
        if path.is_root() {
            return true;
        }
        let prefix = format!("{}/", path.as_str());
        self.files
            .keys()
            .any(|file| file.as_str().starts_with(&prefix))
    }

    fn read_data_file(&self, path: &VfsPath) -> Result<Vec<u8>> {
        if self.unreadable.contains(path) {
            return Err(Error::AccessDenied { path: path.clone() });
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::NotFound { path: path.clone() })
    }
}

impl VirtualFs for MemoryFs {
    fn clear_mounts(&mut self) {
        self.mounts.clear();
        self.machine_mounts = false;
    }

    fn add_mount_point_ex(&mut self, name: &str, target: &Path, kind: MountKind) -> Result<()> {
        validate_mount_name(name)?;
        if self
            .mounts
            .iter()
            .any(|m| m.name.eq_ignore_ascii_case(name))
        {
            return Err(Error::AlreadyExist {
                name: name.to_string(),
            });
        }
        if kind == MountKind::Directory
            && self.host_entries.get(target) == Some(&MountKind::File)
        {
            return Err(Error::NotDirectory {
                path: target.to_path_buf(),
            });
        }
        self.mounts.push(MountPoint {
            name: name.to_string(),
            target: target.to_path_buf(),
            kind,
        });
        Ok(())
    }

    fn create_machine_filesystem_mount_points(&mut self, root_name: &str) -> Result<()> {
        self.add_mount_point_ex(root_name, Path::new("/"), MountKind::Directory)?;
        self.machine_mounts = true;
        Ok(())
    }

    fn probe_target(&self, target: &Path) -> Option<MountKind> {
        self.host_entries.get(target).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_back_inserted_text() {
        let fs = MemoryFs::new().with_file("/nuts/a.nut", "print(1)");
        let text = fs.read_text_file(&VfsPath::new("/nuts/a.nut")).unwrap();
        assert_eq!(text, "print(1)");
    }

    #[test]
    fn unreadable_file_is_not_readable() {
        let mut fs = MemoryFs::new().with_file("/a.nut", "x");
        fs.set_unreadable("/a.nut");
        let path = VfsPath::new("/a.nut");
        assert!(!fs.is_file_exist_and_readable(&path));
        assert!(matches!(
            fs.read_data_file(&path),
            Err(Error::AccessDenied { .. })
        ));
    }

    #[test]
    fn directories_are_implied_by_files() {
        let fs = MemoryFs::new().with_file("/nuts/lib/b.nut", "");
        assert!(fs.is_directory(&VfsPath::new("/nuts")));
        assert!(fs.is_directory(&VfsPath::new("/nuts/lib")));
        assert!(!fs.is_directory(&VfsPath::new("/nu")));
    }

    #[test]
    fn duplicate_mount_names_are_rejected() {
        let mut fs = MemoryFs::new();
        fs.add_mount_point("home", Path::new("/h")).unwrap();
        let err = fs.add_mount_point("HOME", Path::new("/other")).unwrap_err();
        assert!(matches!(err, Error::AlreadyExist { .. }));
    }

    #[test]
    fn machine_mounts_use_the_given_name() {
        let mut fs = MemoryFs::new();
        fs.create_machine_filesystem_mount_points("disk").unwrap();
        assert!(fs.machine_mounts_created());
        assert_eq!(fs.mount_points()[0].name, "disk");

        let err = fs.create_machine_filesystem_mount_points("DISK").unwrap_err();
        assert!(matches!(err, Error::AlreadyExist { .. }));
    }

    #[test]
    fn bom_is_stripped_from_text() {
        let fs = MemoryFs::new().with_file("/a.json", "\u{feff}{}");
        assert_eq!(fs.read_text_file(&VfsPath::new("/a.json")).unwrap(), "{}");
    }
}
