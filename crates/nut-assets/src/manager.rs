//! Facade over the conventional application layout

use std::sync::Arc;

use nut_vfs::{FileSystem, VfsPath};

use crate::app_selector::{self, AppSelectorManifest};
use crate::document::{Document, read_document};
use crate::env::{Environment, ProcessEnvironment};
use crate::kind::{AssetKind, classify};
use crate::layout::{
    APP_ICON_EXTENSIONS, ASSETS_DIR, CONF_DIR, DEFAULT_PROJECT_NAME, ICONS_DIR, MANIFESTS_DIR,
    NUTS_DIR,
};
use crate::manifest::{Manifest, ManifestMerger};
use crate::project::{ProjectGraph, ProjectResolver};
use crate::{Error, Result};

/// Resolves projects, manifests and auxiliary files of one application.
///
/// Holds shared handles only; cloning is cheap and every call re-reads from
/// the filesystem.
#[derive(Clone)]
pub struct AssetsManager {
    fs: Arc<dyn FileSystem>,
    env: Arc<dyn Environment>,
    project_name: Option<String>,
}

impl AssetsManager {
    /// Create a manager reading from `fs` and importing from the process
    /// environment.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self::with_environment(fs, Arc::new(ProcessEnvironment))
    }

    pub fn with_environment(fs: Arc<dyn FileSystem>, env: Arc<dyn Environment>) -> Self {
        Self {
            fs,
            env,
            project_name: None,
        }
    }

    pub fn filesystem(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// Set the project name; an empty name restores the default.
    pub fn set_project_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.project_name = (!name.is_empty()).then_some(name);
    }

    /// The current project name, `nutApplication` when none was set.
    pub fn project_name(&self) -> &str {
        self.project_name.as_deref().unwrap_or(DEFAULT_PROJECT_NAME)
    }

    pub fn detect_kind(&self, path: &VfsPath) -> AssetKind {
        classify(path)
    }

    fn resolver(&self) -> ProjectResolver<'_> {
        ProjectResolver::new(self.fs.as_ref())
    }

    fn merger(&self) -> ManifestMerger<'_> {
        ManifestMerger::new(self.fs.as_ref(), self.env.as_ref())
    }

    /// Resolve one descriptor without loading file contents.
    pub fn read_project(&self, path: &VfsPath) -> Result<ProjectGraph> {
        self.resolver().resolve(path)
    }

    pub fn read_project_files(&self, graph: &mut ProjectGraph) -> Result<()> {
        self.resolver().read_project_files(graph)
    }

    /// Find `/nuts/<project>.<ext>`, resolve it and load every file.
    pub fn read_project_complete(&self) -> Result<ProjectGraph> {
        self.resolver()
            .resolve_default_project(&VfsPath::new(NUTS_DIR), self.project_name())
    }

    pub fn read_app_selector_manifest(&self) -> Result<AppSelectorManifest> {
        app_selector::read_app_selector_manifest(self.fs.as_ref())
    }

    /// Merge one manifest document into `manifest`.
    pub fn update_manifest_from(&self, path: &VfsPath, manifest: &mut Manifest) -> Result<()> {
        self.merger().merge_file(path, manifest)
    }

    /// Merge `/manifests/<project>.dotnut-manifest.{json,yaml}` into
    /// `manifest`.
    pub fn update_manifest(&self, manifest: &mut Manifest) -> Result<()> {
        self.merger().resolve_default_manifest(
            &VfsPath::new(MANIFESTS_DIR),
            self.project_name(),
            manifest,
        )
    }

    pub fn read_conf_text_file(&self, name: &str) -> Result<String> {
        Ok(self.fs.read_text_file(&conf_path(name))?)
    }

    pub fn read_conf_data_file(&self, name: &str) -> Result<Vec<u8>> {
        Ok(self.fs.read_data_file(&conf_path(name))?)
    }

    /// Parse `/conf/<name>` as a JSON/YAML document.
    pub fn read_conf_document(&self, name: &str) -> Result<Document> {
        read_document(self.fs.as_ref(), &conf_path(name))
    }

    pub fn read_assets_data_file(&self, name: &str) -> Result<Vec<u8>> {
        Ok(self.fs.read_data_file(&VfsPath::new(ASSETS_DIR).join(name))?)
    }

    pub fn read_icon_data(&self, name: &str) -> Result<Vec<u8>> {
        Ok(self.fs.read_data_file(&VfsPath::new(ICONS_DIR).join(name))?)
    }

    /// Read `/icons/<project>.png`, or `.ico` if there is no PNG.
    pub fn read_app_icon_data(&self) -> Result<Vec<u8>> {
        let base = VfsPath::new(ICONS_DIR).join(self.project_name());
        for ext in APP_ICON_EXTENSIONS {
            let candidate = base.with_appended_ext(ext);
            if self.fs.is_file_exist_and_readable(&candidate) {
                return Ok(self.fs.read_data_file(&candidate)?);
            }
        }
        Err(Error::NotFound { path: base })
    }
}

fn conf_path(name: &str) -> VfsPath {
    VfsPath::new(CONF_DIR).join(name)
}
