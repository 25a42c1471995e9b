//! `nutassets manifest`

use std::path::Path;

use nut_assets::Manifest;
use nut_vfs::VfsPath;

use super::{open_application, print_json};
use crate::error::Result;

/// Merge the project manifest, or `file` when given, onto the defaults.
pub fn run_manifest(root: &Path, project: Option<&str>, file: Option<&str>) -> Result<()> {
    let manager = open_application(root, project)?;
    let mut manifest = Manifest::default();
    match file {
        Some(file) => manager.update_manifest_from(&VfsPath::new(file), &mut manifest)?,
        None => manager.update_manifest(&mut manifest)?,
    }
    print_json(&manifest)
}
