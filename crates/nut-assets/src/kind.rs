//! Asset kind detection from file names

use std::fmt;

use serde::Serialize;

use crate::layout::{APP_SELECTOR_JSON, APP_SELECTOR_YAML};

/// The kind of asset a file name denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetKind {
    UnknownType,
    /// A single `.nut` script
    SingleAssetFile,
    /// A JSON/YAML document listing files and includes
    ProjectDescriptor,
    ManifestDocument,
    AppSelectorDocument,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownType => "unknownType",
            Self::SingleAssetFile => "singleAssetFile",
            Self::ProjectDescriptor => "projectDescriptor",
            Self::ManifestDocument => "manifestDocument",
            Self::AppSelectorDocument => "appSelectorDocument",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const SINGLE_ASSET_SUFFIX: &str = ".NUT";

const PROJECT_SUFFIXES: [&str; 8] = [
    ".NUTSJSNPROJ",
    ".NUTJSNPROJ",
    ".NUTS.JSON",
    ".NUTS.JSN",
    ".NUTSYMLPROJ",
    ".NUTYMLPROJ",
    ".NUTS.YAML",
    ".NUTS.YML",
];

const MANIFEST_SUFFIXES: [&str; 4] = [
    ".DOTNUT-MANIFEST.JSON",
    ".MANIFEST.JSON",
    ".DOTNUT-MANIFEST.YAML",
    ".MANIFEST.YAML",
];

/// Plain JSON/YAML is a project descriptor unless something above matched.
const GENERIC_DOCUMENT_SUFFIXES: [&str; 3] = [".JSON", ".YAML", ".YML"];

/// Classify a file name or path by its suffix, ignoring case.
///
/// Multi-part suffixes are checked before the generic `.json`/`.yaml`
/// fallback, so the order of the checks below matters.
pub fn classify(path: impl AsRef<str>) -> AssetKind {
    let upper = path.as_ref().to_uppercase();

    if upper.ends_with(SINGLE_ASSET_SUFFIX) {
        return AssetKind::SingleAssetFile;
    }
    if PROJECT_SUFFIXES.iter().any(|s| upper.ends_with(s)) {
        return AssetKind::ProjectDescriptor;
    }

    let file_name = upper.rsplit(['/', '\\']).next().unwrap_or_default();
    if file_name == APP_SELECTOR_JSON.to_uppercase() || file_name == APP_SELECTOR_YAML.to_uppercase()
    {
        return AssetKind::AppSelectorDocument;
    }

    if MANIFEST_SUFFIXES.iter().any(|s| upper.ends_with(s)) {
        return AssetKind::ManifestDocument;
    }
    if GENERIC_DOCUMENT_SUFFIXES.iter().any(|s| upper.ends_with(s)) {
        return AssetKind::ProjectDescriptor;
    }
    AssetKind::UnknownType
}
