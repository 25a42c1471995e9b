//! Command implementations for nut-cli

pub mod apps;
pub mod classify;
pub mod manifest;
pub mod project;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use nut_assets::{AssetsManager, configure_assets_filesystem};
use nut_vfs::{HostAppPaths, MountedFs};
use serde::Serialize;

use crate::error::Result;

pub use apps::run_apps;
pub use classify::run_classify;
pub use manifest::run_manifest;
pub use project::run_project;

/// Build a manager over the conventional layout below `root`.
///
/// The application name is the project name when given, else the name of
/// the root directory.
pub fn open_application(root: &Path, project: Option<&str>) -> Result<AssetsManager> {
    let root = absolute(root)?;
    let app_name = project
        .map(str::to_string)
        .or_else(|| root.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_default();

    let paths = HostAppPaths::new(app_name, root.clone());
    let mut fs = MountedFs::new();
    configure_assets_filesystem(&paths, &mut fs)?;
    tracing::debug!(root = %root.display(), "Opened application");

    let mut manager = AssetsManager::new(Arc::new(fs));
    if let Some(name) = project {
        manager.set_project_name(name);
    }
    Ok(manager)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
