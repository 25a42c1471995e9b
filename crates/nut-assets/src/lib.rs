//! Asset project resolution and manifest merging for nut applications
//!
//! Two engines sit on top of the [`nut_vfs`] capability traits:
//!
//! - the project graph resolver ([`project`]) expands a project descriptor
//!   into a flat, deduplicated, order-preserving list of asset files;
//! - the manifest merge engine ([`manifest`]) overlays a JSON/YAML document
//!   onto a [`Manifest`] that already holds defaults.
//!
//! [`AssetsManager`] ties both to the conventional virtual layout
//! (`/nuts`, `/manifests`, `/conf`, ...).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nut_assets::AssetsManager;
//! use nut_vfs::MemoryFs;
//!
//! let fs = MemoryFs::new()
//!     .with_file("/nuts/demo.nuts.json", r#"{"files": ["main.nut"]}"#)
//!     .with_file("/nuts/main.nut", "print(1)");
//!
//! let mut manager = AssetsManager::new(Arc::new(fs));
//! manager.set_project_name("demo");
//!
//! let project = manager.read_project_complete().unwrap();
//! assert_eq!(project.files.len(), 1);
//! assert_eq!(project.file_contents[0], "print(1)");
//! ```

pub mod app_selector;
pub mod document;
pub mod env;
pub mod error;
pub mod kind;
pub mod layout;
pub mod manager;
pub mod manifest;
pub mod mounts;
pub mod project;

pub use app_selector::{AppSelectorEntry, AppSelectorManifest};
pub use document::{Document, DocumentFormat, FormatDiagnostic};
pub use env::{Environment, ProcessEnvironment};
pub use error::{Error, Result};
pub use kind::{AssetKind, classify};
pub use manager::AssetsManager;
pub use manifest::{
    CustomMountPoint, FilesystemSection, GraphicsMode, HotkeysSection, Manifest, ManifestMerger,
    MountToggle, StartupSection, WindowSection,
};
pub use mounts::{MountStep, configure_assets_filesystem, configure_filesystem_mounts};
pub use project::{ProjectGraph, ProjectResolver, VisitedSets};
