//! Project graph resolution
//!
//! A project is either a single `.nut` file or a descriptor document whose
//! `files` array lists asset files and `{"include": ...}` directives pointing
//! at further descriptors:
//!
//! ```json
//! {
//!     "files": [
//!         "main.nut",
//!         { "include": "lib/lib.nuts.json" },
//!         { "include": ["ui.nuts.yaml", "net.nuts.json"] }
//!     ]
//! }
//! ```
//!
//! Resolution flattens the include tree depth-first, left to right, into one
//! list of asset files. Relative entries are resolved against the directory
//! of the descriptor that names them. The first occurrence of a path
//! (compared case-insensitively) wins; later duplicates and already visited
//! descriptors are skipped, which also makes include cycles terminate.
//!
//! # Example
//!
//! ```
//! use nut_assets::ProjectResolver;
//! use nut_vfs::{MemoryFs, VfsPath};
//!
//! let fs = MemoryFs::new()
//!     .with_file("/nuts/app.nuts.json", r#"{"files": ["a.nut", {"include": "lib.nuts.json"}]}"#)
//!     .with_file("/nuts/lib.nuts.json", r#"{"files": ["b.nut", {"include": "app.nuts.json"}]}"#)
//!     .with_file("/nuts/a.nut", "")
//!     .with_file("/nuts/b.nut", "");
//!
//! let graph = ProjectResolver::new(&fs)
//!     .resolve(&VfsPath::new("/nuts/app.nuts.json"))
//!     .unwrap();
//! assert_eq!(graph.files, vec![VfsPath::new("/nuts/a.nut"), VfsPath::new("/nuts/b.nut")]);
//! ```

use std::collections::{HashSet, VecDeque};

use nut_vfs::{FileSystem, VfsPath};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::document::{read_document, type_name};
use crate::kind::{AssetKind, classify};
use crate::layout::PROJECT_EXTENSIONS;
use crate::{Error, Result};

/// The flattened result of resolving a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGraph {
    /// The descriptor (or single asset file) the project was resolved from
    pub project_file_name: VfsPath,
    /// Asset files in first-discovery order, without duplicates
    pub files: Vec<VfsPath>,
    /// Text of each file, parallel to `files` once loaded
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_contents: Vec<String>,
}

impl ProjectGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.project_file_name = VfsPath::root();
        self.files.clear();
        self.file_contents.clear();
    }

    /// Whether every listed file has its contents loaded.
    pub fn is_loaded(&self) -> bool {
        self.files.len() == self.file_contents.len()
    }

    /// Iterate over `(path, contents)` pairs of loaded files.
    pub fn iter_loaded(&self) -> impl Iterator<Item = (&VfsPath, &str)> {
        self.files
            .iter()
            .zip(self.file_contents.iter().map(String::as_str))
    }
}

/// Deduplication guards for one top-level resolution.
///
/// Paths are stored by their case-insensitive key.
#[derive(Debug, Clone, Default)]
pub struct VisitedSets {
    descriptors: HashSet<String>,
    files: HashSet<String>,
}

impl VisitedSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a descriptor visited; `false` if it already was.
    pub fn visit_descriptor(&mut self, path: &VfsPath) -> bool {
        self.descriptors.insert(path.case_key())
    }

    /// Mark an asset file visited; `false` if it already was.
    pub fn visit_file(&mut self, path: &VfsPath) -> bool {
        self.files.insert(path.case_key())
    }

    pub fn contains_descriptor(&self, path: &VfsPath) -> bool {
        self.descriptors.contains(&path.case_key())
    }

    pub fn contains_file(&self, path: &VfsPath) -> bool {
        self.files.contains(&path.case_key())
    }
}

/// Work still to do for one open descriptor.
enum Pending {
    /// A raw element of the `files` array
    Entry(Value),
    /// One target of an `include` directive
    Include(String),
}

struct Frame {
    descriptor: VfsPath,
    pending: VecDeque<Pending>,
}

/// Resolves project descriptors against a virtual filesystem.
pub struct ProjectResolver<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ProjectResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Resolve a descriptor (or single asset file) into a fresh graph.
    ///
    /// File contents are not loaded; see [`ProjectResolver::read_project_files`].
    pub fn resolve(&self, path: &VfsPath) -> Result<ProjectGraph> {
        let mut graph = ProjectGraph::new();
        let mut visited = VisitedSets::new();
        self.resolve_into(path, &mut graph, &mut visited)?;
        Ok(graph)
    }

    /// Resolve `path`, appending discovered files to `graph`.
    ///
    /// `visited` is shared by the whole walk; pass the same sets to several
    /// calls to deduplicate across them. Fails fast: the first error ends
    /// the walk and `graph` must then be treated as incomplete.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `path` itself is not a readable file
    /// - `UnknownFormat` if a descriptor is neither JSON nor YAML
    /// - `InvalidFormat` if a descriptor has the wrong shape
    /// - `MissingFiles` if a listed file or included descriptor is absent
    pub fn resolve_into(
        &self,
        path: &VfsPath,
        graph: &mut ProjectGraph,
        visited: &mut VisitedSets,
    ) -> Result<()> {
        if !self.fs.is_file_exist_and_readable(path) {
            return Err(Error::NotFound { path: path.clone() });
        }
        graph.project_file_name = path.clone();

        if classify(path) != AssetKind::ProjectDescriptor {
            if visited.visit_file(path) {
                graph.files.push(path.clone());
            }
            return Ok(());
        }

        visited.visit_descriptor(path);
        let mut stack = vec![self.open_descriptor(path)?];

        while let Some(frame) = stack.last_mut() {
            let Some(item) = frame.pending.pop_front() else {
                stack.pop();
                continue;
            };
            let descriptor = frame.descriptor.clone();

            match item {
                Pending::Entry(Value::String(name)) => {
                    self.add_file(&descriptor, &name, graph, visited)?;
                }
                Pending::Entry(Value::Object(entry)) => {
                    let targets = include_targets(&entry, &descriptor)?;
                    for target in targets.into_iter().rev() {
                        frame.pending.push_front(Pending::Include(target));
                    }
                }
                Pending::Entry(other) => {
                    return Err(Error::invalid_format(
                        &descriptor,
                        format!(
                            "`files` entries must be strings or objects, got {}",
                            type_name(&other)
                        ),
                    ));
                }
                Pending::Include(target) => {
                    let included = descriptor.dir().join(&target);
                    if !visited.visit_descriptor(&included) {
                        tracing::debug!(%included, "Skipping already visited descriptor");
                        continue;
                    }
                    if !self.fs.is_file_exist_and_readable(&included) {
                        return Err(Error::MissingFiles {
                            project: descriptor,
                            file: included,
                        });
                    }
                    if classify(&included) == AssetKind::ProjectDescriptor {
                        stack.push(self.open_descriptor(&included)?);
                    } else if visited.visit_file(&included) {
                        graph.files.push(included);
                    }
                }
            }
        }

        Ok(())
    }

    /// Read the text of every file in `graph`, in list order.
    ///
    /// Contents are only stored if every read succeeds.
    pub fn read_project_files(&self, graph: &mut ProjectGraph) -> Result<()> {
        let mut contents = Vec::with_capacity(graph.files.len());
        for file in &graph.files {
            contents.push(self.fs.read_text_file(file)?);
        }
        graph.file_contents = contents;
        Ok(())
    }

    /// Probe `<base_dir>/<project_name>.<ext>` for every known descriptor
    /// extension, resolve the first that exists and load its files.
    ///
    /// Only `NotFound` moves on to the next candidate; a descriptor that
    /// exists but is broken stops the probe with its error.
    pub fn resolve_default_project(
        &self,
        base_dir: &VfsPath,
        project_name: &str,
    ) -> Result<ProjectGraph> {
        let base = base_dir.join(project_name);
        for ext in PROJECT_EXTENSIONS {
            let candidate = base.with_appended_ext(ext);
            match self.resolve(&candidate) {
                Ok(mut graph) => {
                    tracing::debug!(%candidate, files = graph.files.len(), "Resolved project");
                    self.read_project_files(&mut graph)?;
                    return Ok(graph);
                }
                Err(Error::NotFound { .. }) => {
                    tracing::debug!(%candidate, "No project descriptor");
                }
                Err(e) => return Err(e),
            }
        }
        Err(Error::NotFound { path: base })
    }

    fn open_descriptor(&self, path: &VfsPath) -> Result<Frame> {
        let mut root = read_document(self.fs, path)?.into_object(path)?;
        let entries = match root.remove("files") {
            None => Vec::new(),
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(Error::invalid_format(
                    path,
                    format!("`files` must be an array, got {}", type_name(&other)),
                ));
            }
        };
        Ok(Frame {
            descriptor: path.clone(),
            pending: entries.into_iter().map(Pending::Entry).collect(),
        })
    }

    fn add_file(
        &self,
        descriptor: &VfsPath,
        name: &str,
        graph: &mut ProjectGraph,
        visited: &mut VisitedSets,
    ) -> Result<()> {
        let file = descriptor.dir().join(name);
        if !visited.visit_file(&file) {
            tracing::debug!(%file, "Skipping duplicate file entry");
            return Ok(());
        }
        graph.files.push(file.clone());
        if !self.fs.is_file_exist_and_readable(&file) {
            return Err(Error::MissingFiles {
                project: descriptor.clone(),
                file,
            });
        }
        Ok(())
    }
}

fn include_targets(entry: &Map<String, Value>, descriptor: &VfsPath) -> Result<Vec<String>> {
    match entry.get("include") {
        Some(Value::String(target)) => Ok(vec![target.clone()]),
        Some(Value::Array(targets)) => targets
            .iter()
            .map(|t| match t {
                Value::String(s) => Ok(s.clone()),
                other => Err(Error::invalid_format(
                    descriptor,
                    format!("`include` targets must be strings, got {}", type_name(other)),
                )),
            })
            .collect(),
        Some(other) => Err(Error::invalid_format(
            descriptor,
            format!(
                "`include` must be a string or an array of strings, got {}",
                type_name(other)
            ),
        )),
        None => Err(Error::invalid_format(
            descriptor,
            "object entries in `files` must have an `include` key",
        )),
    }
}
