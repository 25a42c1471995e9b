//! `nutassets project`

use std::path::Path;

use nut_vfs::VfsPath;

use super::{open_application, print_json};
use crate::error::Result;

/// Resolve the default project, or `file` when given, and print the graph.
pub fn run_project(root: &Path, project: Option<&str>, file: Option<&str>, contents: bool) -> Result<()> {
    let manager = open_application(root, project)?;

    let mut graph = match file {
        Some(file) => {
            let mut graph = manager.read_project(&VfsPath::new(file))?;
            if contents {
                manager.read_project_files(&mut graph)?;
            }
            graph
        }
        None => manager.read_project_complete()?,
    };
    if !contents {
        graph.file_contents.clear();
    }

    tracing::debug!(files = graph.files.len(), "Project resolved");
    print_json(&graph)
}
