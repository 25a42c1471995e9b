//! Application path providers

use std::fs;
use std::path::{Path, PathBuf};

use crate::AppPaths;

/// Application paths derived from the host platform conventions.
///
/// - home: `<data_dir>/<app>` (`~/.local/share/<app>` on Linux)
/// - temp: `<temp_dir>/<app>`
/// - logs: `<data_local_dir>/<app>/logs`
#[derive(Debug, Clone)]
pub struct HostAppPaths {
    name: String,
    root: PathBuf,
}

impl HostAppPaths {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }
}

fn ensure_dir(path: PathBuf, create: bool) -> Option<PathBuf> {
    if create && !path.is_dir() {
        if let Err(e) = fs::create_dir_all(&path) {
            tracing::warn!("Failed to create {}: {}", path.display(), e);
            return None;
        }
    }
    Some(path)
}

impl AppPaths for HostAppPaths {
    fn app_name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn app_root_path(&self) -> Option<PathBuf> {
        Some(self.root.clone())
    }

    fn app_home_path(&self, create: bool) -> Option<PathBuf> {
        ensure_dir(dirs::data_dir()?.join(&self.name), create)
    }

    fn app_temp_path(&self, create: bool) -> Option<PathBuf> {
        ensure_dir(std::env::temp_dir().join(&self.name), create)
    }

    fn app_logs_path(&self, create: bool) -> Option<PathBuf> {
        ensure_dir(dirs::data_local_dir()?.join(&self.name).join("logs"), create)
    }
}

/// Fixed application paths; unset locations are reported as unavailable.
#[derive(Debug, Clone, Default)]
pub struct StaticAppPaths {
    pub name: Option<String>,
    pub root: Option<PathBuf>,
    pub home: Option<PathBuf>,
    pub temp: Option<PathBuf>,
    pub logs: Option<PathBuf>,
}

impl StaticAppPaths {
    /// All locations placed under `base` as `root`, `home`, `temp`, `logs`.
    pub fn under(name: impl Into<String>, base: &Path) -> Self {
        Self {
            name: Some(name.into()),
            root: Some(base.join("root")),
            home: Some(base.join("home")),
            temp: Some(base.join("temp")),
            logs: Some(base.join("logs")),
        }
    }
}

impl AppPaths for StaticAppPaths {
    fn app_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn app_root_path(&self) -> Option<PathBuf> {
        self.root.clone()
    }

    fn app_home_path(&self, _create: bool) -> Option<PathBuf> {
        self.home.clone()
    }

    fn app_temp_path(&self, _create: bool) -> Option<PathBuf> {
        self.temp.clone()
    }

    fn app_logs_path(&self, _create: bool) -> Option<PathBuf> {
        self.logs.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_is_created_on_request() {
        let name = format!("nut-vfs-test-{}", std::process::id());
        let paths = HostAppPaths::new(&name, "/unused");
        let temp = paths.app_temp_path(true).unwrap();
        assert!(temp.is_dir());
        assert!(temp.ends_with(&name));
        fs::remove_dir_all(temp).unwrap();
    }

    #[test]
    fn static_paths_report_missing_locations() {
        let paths = StaticAppPaths::default();
        assert_eq!(paths.app_home_path(true), None);
        assert_eq!(paths.app_root_path(), None);
    }
}
