//! Typed application manifest with built-in defaults

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Rendering preference of the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GraphicsMode {
    #[default]
    PreferSpeed,
    PreferQuality,
    Unknown,
}

impl GraphicsMode {
    /// Map a manifest value, ignoring case.
    ///
    /// Returns `None` for names outside the table so the caller can keep
    /// the previous mode. The `preffer*` spellings are accepted for older
    /// manifests.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "preferspeed" | "prefferspeed" => Some(Self::PreferSpeed),
            "preferquality" | "prefferquality" => Some(Self::PreferQuality),
            "invalid" | "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreferSpeed => "preferSpeed",
            Self::PreferQuality => "preferQuality",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for GraphicsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSection {
    pub title: String,
}

/// Hotkeys the runtime is allowed to honour
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotkeysSection {
    pub allow_reload_script: bool,
    pub allow_fullscreen: bool,
}

impl Default for HotkeysSection {
    fn default() -> Self {
        Self {
            allow_reload_script: true,
            allow_fullscreen: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartupSection {
    pub run_fullscreen: bool,
}

/// One of the four built-in mounts.
///
/// With no explicit `target` the location comes from the app-paths
/// provider (or, for the local filesystem, the machine mount points).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MountToggle {
    pub enabled: bool,
    pub point_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
}

impl MountToggle {
    pub fn new(enabled: bool, point_name: &str) -> Self {
        Self {
            enabled,
            point_name: point_name.to_string(),
            target: None,
        }
    }
}

/// A `{name, target}` pair from `filesystem.mountPoints`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomMountPoint {
    pub name: String,
    pub target: PathBuf,
}

/// The mount plan of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesystemSection {
    pub local_filesystem: MountToggle,
    pub home: MountToggle,
    pub temp: MountToggle,
    pub logs: MountToggle,
    /// Custom mounts in declaration order, names unique ignoring case
    pub mount_points: Vec<CustomMountPoint>,
}

impl Default for FilesystemSection {
    fn default() -> Self {
        Self {
            local_filesystem: MountToggle::new(false, "root"),
            home: MountToggle::new(true, "home"),
            temp: MountToggle::new(true, "temp"),
            logs: MountToggle::new(true, "logs"),
            mount_points: Vec::new(),
        }
    }
}

impl FilesystemSection {
    /// Add a custom mount, replacing the target of a same-named one.
    pub fn upsert_mount_point(&mut self, name: String, target: PathBuf) {
        match self
            .mount_points
            .iter_mut()
            .find(|mp| mp.name.eq_ignore_ascii_case(&name))
        {
            Some(existing) => existing.target = target,
            None => self.mount_points.push(CustomMountPoint { name, target }),
        }
    }
}

/// Application manifest
///
/// Every field starts at its default; merging documents only overwrites the
/// fields a document names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub app_group: String,
    pub graphics_mode: GraphicsMode,
    pub window: WindowSection,
    pub hotkeys: HotkeysSection,
    pub startup: StartupSection,
    pub filesystem: FilesystemSection,
    /// Environment overlay, keys unique
    pub variables: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }
}
