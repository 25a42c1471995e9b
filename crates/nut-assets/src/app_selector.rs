//! App-selector list reader
//!
//! A launcher ships `dotnut.app-selector.manifest.json` (or `.yaml`) at the
//! virtual root:
//!
//! ```yaml
//! app-list:
//!   - app-name: editor
//!     title: Text Editor
//!   - app-name: viewer
//! ```
//!
//! Malformed entries are skipped with a warning; only a missing or
//! non-array `app-list` fails the read.

use nut_vfs::{FileSystem, VfsPath};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::document::{lookup, read_document, type_name};
use crate::layout::{APP_SELECTOR_JSON, APP_SELECTOR_YAML};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSelectorEntry {
    /// Display title, the app name when the entry has none
    pub app_title: String,
    pub app_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppSelectorManifest {
    pub apps: Vec<AppSelectorEntry>,
}

impl AppSelectorManifest {
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn find(&self, app_name: &str) -> Option<&AppSelectorEntry> {
        self.apps.iter().find(|a| a.app_name == app_name)
    }
}

/// Read the fixed-name app-selector manifest, JSON first, then YAML.
pub fn read_app_selector_manifest(fs: &dyn FileSystem) -> Result<AppSelectorManifest> {
    let root = VfsPath::root();
    let candidates = [root.join(APP_SELECTOR_JSON), root.join(APP_SELECTOR_YAML)];
    match candidates
        .iter()
        .find(|c| fs.is_file_exist_and_readable(c))
    {
        Some(path) => read_app_selector_from(fs, path),
        None => Err(Error::NotFound {
            path: candidates[0].clone(),
        }),
    }
}

/// Read an app-selector manifest from an explicit path.
pub fn read_app_selector_from(fs: &dyn FileSystem, path: &VfsPath) -> Result<AppSelectorManifest> {
    let root = read_document(fs, path)?.into_object(path)?;
    let entries = match lookup(&root, "appList") {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(Error::invalid_format(
                path,
                format!("`app-list` must be an array, got {}", type_name(other)),
            ));
        }
        None => return Err(Error::invalid_format(path, "missing `app-list`")),
    };

    let mut manifest = AppSelectorManifest::default();
    for (index, entry) in entries.iter().enumerate() {
        match parse_entry(entry) {
            Some(app) => manifest.apps.push(app),
            None => tracing::warn!(%path, index, "Skipping app-selector entry without an app name"),
        }
    }
    Ok(manifest)
}

fn parse_entry(entry: &Value) -> Option<AppSelectorEntry> {
    let object = entry.as_object()?;
    let app_name = text(object, &["appName"])?;
    if app_name.is_empty() {
        return None;
    }
    let app_title = text(object, &["title", "appTitle"]).unwrap_or_else(|| app_name.clone());
    Some(AppSelectorEntry {
        app_title,
        app_name,
    })
}

fn text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| lookup(object, k))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nut_vfs::MemoryFs;

    #[test]
    fn yaml_sibling_is_used_when_json_is_absent() {
        let fs = MemoryFs::new().with_file(
            "/dotnut.app-selector.manifest.yaml",
            "app-list:\n  - app-name: a\n    app-title: Alpha\n",
        );
        let list = read_app_selector_manifest(&fs).unwrap();
        assert_eq!(
            list.apps,
            vec![AppSelectorEntry {
                app_title: "Alpha".into(),
                app_name: "a".into(),
            }]
        );
    }

    #[test]
    fn missing_document_is_not_found() {
        let err = read_app_selector_manifest(&MemoryFs::new()).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn app_list_must_be_an_array() {
        let fs = MemoryFs::new().with_file("/dotnut.app-selector.manifest.json", r#"{"app-list": {}}"#);
        assert!(matches!(
            read_app_selector_manifest(&fs),
            Err(Error::InvalidFormat { .. })
        ));
    }

    #[test]
    fn junk_entries_are_skipped() {
        let fs = MemoryFs::new().with_file(
            "/dotnut.app-selector.manifest.json",
            r#"{"appList": [1, {"app-name": ""}, {"app-name": 5}, {"appName": "ok"}]}"#,
        );
        let list = read_app_selector_manifest(&fs).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.find("ok").map(|a| a.app_title.as_str()), Some("ok"));
    }
}
