//! Application manifest and the merge engine that fills it

mod merge;
mod types;

pub use merge::ManifestMerger;
pub use types::{
    CustomMountPoint, FilesystemSection, GraphicsMode, HotkeysSection, Manifest, MountToggle,
    StartupSection, WindowSection,
};
