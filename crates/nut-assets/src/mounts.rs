//! Filesystem mount configuration
//!
//! Turns a manifest's [`FilesystemSection`] into mount-table calls on a
//! [`VirtualFs`], and sets up the conventional asset directories under the
//! application root.

use std::fmt;
use std::path::PathBuf;

use nut_vfs::{AppPaths, MountKind, VirtualFs};
use serde::Serialize;

use crate::layout::{APP_SELECTOR_JSON, APP_SELECTOR_YAML, ASSET_DIRECTORIES};
use crate::manifest::{FilesystemSection, MountToggle};
use crate::{Error, Result};

/// Identifies the mount call that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "step", content = "name")]
pub enum MountStep {
    AppRoot,
    /// One of the conventional asset directories or root files
    Conventional(String),
    LocalFilesystem,
    Home,
    Temp,
    Logs,
    Custom(String),
}

impl fmt::Display for MountStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AppRoot => write!(f, "application root"),
            Self::Conventional(name) => write!(f, "conventional '{name}'"),
            Self::LocalFilesystem => write!(f, "local filesystem"),
            Self::Home => write!(f, "home"),
            Self::Temp => write!(f, "temp"),
            Self::Logs => write!(f, "logs"),
            Self::Custom(name) => write!(f, "custom '{name}'"),
        }
    }
}

/// Apply a manifest's mount plan.
///
/// Mounts are issued in order: local filesystem, home, temp, logs, then the
/// custom mount points. The first failure aborts the call and names the
/// step; mounts issued before it stay in place.
pub fn configure_filesystem_mounts(
    section: &FilesystemSection,
    app_paths: &dyn AppPaths,
    vfs: &mut dyn VirtualFs,
) -> Result<()> {
    let local = &section.local_filesystem;
    if local.enabled {
        let step = MountStep::LocalFilesystem;
        match &local.target {
            Some(target) => mount(vfs, step, &local.point_name, target.clone(), MountKind::Directory)?,
            None => vfs
                .create_machine_filesystem_mount_points(&local.point_name)
                .map_err(|source| Error::MountFailed { step, source })?,
        }
    }

    mount_toggle(vfs, MountStep::Home, &section.home, || app_paths.app_home_path(true))?;
    mount_toggle(vfs, MountStep::Temp, &section.temp, || app_paths.app_temp_path(true))?;
    mount_toggle(vfs, MountStep::Logs, &section.logs, || app_paths.app_logs_path(true))?;

    for custom in &section.mount_points {
        let step = MountStep::Custom(custom.name.clone());
        let Some(kind) = vfs.probe_target(&custom.target) else {
            return Err(Error::MountFailed {
                step,
                source: nut_vfs::Error::InvalidMountTarget {
                    name: custom.name.clone(),
                    target: custom.target.clone(),
                },
            });
        };
        mount(vfs, step, &custom.name, custom.target.clone(), kind)?;
    }
    Ok(())
}

/// Reset the mount table to the conventional application layout.
///
/// Every directory in [`ASSET_DIRECTORIES`] below the application root is
/// mounted under its own name, and the app-selector manifest is exposed at
/// the virtual root when the application ships one.
pub fn configure_assets_filesystem(app_paths: &dyn AppPaths, vfs: &mut dyn VirtualFs) -> Result<()> {
    let root = app_paths.app_root_path().ok_or(Error::MountTargetUnavailable {
        step: MountStep::AppRoot,
    })?;

    vfs.clear_mounts();
    for dir in ASSET_DIRECTORIES {
        mount(
            vfs,
            MountStep::Conventional(dir.to_string()),
            dir,
            root.join(dir),
            MountKind::Directory,
        )?;
    }

    for file in [APP_SELECTOR_JSON, APP_SELECTOR_YAML] {
        let target = root.join(file);
        if vfs.probe_target(&target) == Some(MountKind::File) {
            mount(vfs, MountStep::Conventional(file.to_string()), file, target, MountKind::File)?;
        }
    }

    tracing::debug!(root = %root.display(), "Configured assets filesystem");
    Ok(())
}

fn mount_toggle(
    vfs: &mut dyn VirtualFs,
    step: MountStep,
    toggle: &MountToggle,
    default_target: impl FnOnce() -> Option<PathBuf>,
) -> Result<()> {
    if !toggle.enabled {
        return Ok(());
    }
    let target = match &toggle.target {
        Some(target) => target.clone(),
        None => default_target().ok_or_else(|| Error::MountTargetUnavailable { step: step.clone() })?,
    };
    mount(vfs, step, &toggle.point_name, target, MountKind::Directory)
}

fn mount(
    vfs: &mut dyn VirtualFs,
    step: MountStep,
    name: &str,
    target: PathBuf,
    kind: MountKind,
) -> Result<()> {
    tracing::debug!(%step, name, target = %target.display(), "Mounting");
    vfs.add_mount_point_ex(name, &target, kind)
        .map_err(|source| Error::MountFailed { step, source })
}
