//! `nutassets apps`

use std::path::Path;

use super::{open_application, print_json};
use crate::error::Result;

pub fn run_apps(root: &Path) -> Result<()> {
    let manager = open_application(root, None)?;
    let list = manager.read_app_selector_manifest()?;
    if list.is_empty() {
        tracing::warn!("The app-selector manifest lists no applications");
    }
    print_json(&list)
}
