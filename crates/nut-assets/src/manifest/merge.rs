//! Overlaying JSON/YAML manifest documents onto a [`Manifest`]
//!
//! Recognised top-level keys are looked up by their camelCase spelling first
//! and their hyphenated spelling second (`graphicsMode` / `graphics-mode`).
//! Keys a document does not name leave the manifest untouched; unknown keys
//! are ignored.

use std::path::PathBuf;

use nut_vfs::{FileSystem, VfsPath};
use serde_json::{Map, Value};

use super::types::{GraphicsMode, Manifest, MountToggle};
use crate::document::{lookup, read_document, type_name};
use crate::env::Environment;
use crate::layout::MANIFEST_EXTENSIONS;
use crate::{Error, Result};

/// Applies manifest documents read from a virtual filesystem.
pub struct ManifestMerger<'a> {
    fs: &'a dyn FileSystem,
    env: &'a dyn Environment,
}

impl<'a> ManifestMerger<'a> {
    pub fn new(fs: &'a dyn FileSystem, env: &'a dyn Environment) -> Self {
        Self { fs, env }
    }

    /// Read the document at `path` and merge it into `manifest`.
    ///
    /// On error `manifest` is left exactly as it was.
    pub fn merge_file(&self, path: &VfsPath, manifest: &mut Manifest) -> Result<()> {
        let root = read_document(self.fs, path)?.root;
        self.merge_value(&root, path, manifest)
    }

    /// Merge an already parsed document. `source` is only used in errors.
    pub fn merge_value(&self, root: &Value, source: &VfsPath, manifest: &mut Manifest) -> Result<()> {
        let object = match root {
            Value::Object(object) => object,
            Value::Null => return Ok(()),
            other => {
                return Err(Error::invalid_format(
                    source,
                    format!("manifest root must be an object, got {}", type_name(other)),
                ));
            }
        };

        let mut updated = manifest.clone();
        Apply {
            source,
            env: self.env,
            manifest: &mut updated,
        }
        .document(object)?;
        *manifest = updated;
        Ok(())
    }

    /// Merge `<manifests_dir>/<project_name>.dotnut-manifest.json`, falling
    /// back to the `.yaml` sibling when the JSON attempt fails.
    ///
    /// The result is that of the last attempt.
    pub fn resolve_default_manifest(
        &self,
        manifests_dir: &VfsPath,
        project_name: &str,
        manifest: &mut Manifest,
    ) -> Result<()> {
        let base = manifests_dir.join(project_name);
        let mut result = Ok(());
        for ext in MANIFEST_EXTENSIONS {
            let candidate = base.with_appended_ext(ext);
            result = self.merge_file(&candidate, manifest);
            match &result {
                Ok(()) => {
                    tracing::debug!(%candidate, "Merged manifest");
                    break;
                }
                Err(Error::NotFound { .. }) => {}
                Err(e) => tracing::warn!(%candidate, "Manifest not applied: {e}"),
            }
        }
        result
    }
}

/// One merge in progress against a scratch copy of the manifest.
struct Apply<'a> {
    source: &'a VfsPath,
    env: &'a dyn Environment,
    manifest: &'a mut Manifest,
}

impl Apply<'_> {
    fn document(&mut self, root: &Map<String, Value>) -> Result<()> {
        if let Some(group) = self.string(root, "appGroup")? {
            self.manifest.app_group = group;
        }

        if let Some(name) = self.string(root, "graphicsMode")? {
            match GraphicsMode::from_name(&name) {
                Some(mode) => self.manifest.graphics_mode = mode,
                None => tracing::warn!(source = %self.source, "Ignoring unknown graphics mode '{name}'"),
            }
        }

        if let Some(window) = self.section(root, "window")? {
            if let Some(title) = self.string(window, "title")? {
                self.manifest.window.title = title;
            }
        }

        if let Some(hotkeys) = self.section(root, "hotkeys")? {
            if let Some(v) = self.boolean(hotkeys, "allowReloadScript")? {
                self.manifest.hotkeys.allow_reload_script = v;
            }
            if let Some(v) = self.boolean(hotkeys, "allowFullscreen")? {
                self.manifest.hotkeys.allow_fullscreen = v;
            }
        }

        if let Some(startup) = self.section(root, "startup")? {
            if let Some(v) = self.boolean(startup, "runFullscreen")? {
                self.manifest.startup.run_fullscreen = v;
            }
        }

        self.clear_variables(root)?;
        self.import_environment(root)?;
        self.variables(root)?;

        if let Some(filesystem) = self.section(root, "filesystem")? {
            self.filesystem(filesystem)?;
        }
        Ok(())
    }

    fn clear_variables(&mut self, root: &Map<String, Value>) -> Result<()> {
        match lookup(root, "clearVariables") {
            None | Some(Value::Bool(false)) => {}
            Some(Value::Bool(true)) => self.manifest.variables.clear(),
            Some(Value::Array(names)) => {
                for name in self.names(names, "clearVariables")? {
                    self.manifest.variables.remove(name);
                }
            }
            Some(other) => return Err(self.wrong_type("clearVariables", "boolean or array", other)),
        }
        Ok(())
    }

    fn import_environment(&mut self, root: &Map<String, Value>) -> Result<()> {
        match lookup(root, "importEnvironmentVariables") {
            None | Some(Value::Bool(false)) => {}
            Some(Value::Bool(true)) => {
                self.manifest.variables.extend(self.env.vars());
            }
            Some(Value::Array(names)) => {
                for name in self.names(names, "importEnvironmentVariables")? {
                    if let Some(value) = self.env.var(name) {
                        self.manifest.variables.insert(name.to_string(), value);
                    }
                }
            }
            Some(other) => {
                return Err(self.wrong_type("importEnvironmentVariables", "boolean or array", other));
            }
        }
        Ok(())
    }

    fn variables(&mut self, root: &Map<String, Value>) -> Result<()> {
        let Some(variables) = self.section(root, "variables")? else {
            return Ok(());
        };
        for (key, value) in variables {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(self.wrong_type(&format!("variables.{key}"), "string", other));
                }
            };
            self.manifest.variables.insert(key.clone(), text);
        }
        Ok(())
    }

    fn filesystem(&mut self, section: &Map<String, Value>) -> Result<()> {
        let mut fs = std::mem::take(&mut self.manifest.filesystem);
        self.toggle(section, "mountLocalFilesystem", "localFilesystem", &mut fs.local_filesystem)?;
        self.toggle(section, "mountHome", "home", &mut fs.home)?;
        self.toggle(section, "mountTemp", "temp", &mut fs.temp)?;
        self.toggle(section, "mountLogs", "logs", &mut fs.logs)?;

        if self.boolean(section, "clearExistingMountPoints")? == Some(true) {
            fs.mount_points.clear();
        }

        match lookup(section, "mountPoints") {
            None => {}
            Some(Value::Array(entries)) => {
                for entry in entries {
                    let Value::Object(entry) = entry else {
                        return Err(self.wrong_type("mountPoints[]", "object", entry));
                    };
                    let name = self.required_string(entry, &["name", "mountPointName"])?;
                    let target = self.required_string(entry, &["target", "mountPointTarget"])?;
                    fs.upsert_mount_point(name, PathBuf::from(target));
                }
            }
            Some(other) => return Err(self.wrong_type("mountPoints", "array", other)),
        }

        self.manifest.filesystem = fs;
        Ok(())
    }

    fn toggle(
        &self,
        section: &Map<String, Value>,
        enable_key: &str,
        prefix: &str,
        toggle: &mut MountToggle,
    ) -> Result<()> {
        if let Some(enabled) = self.boolean(section, enable_key)? {
            toggle.enabled = enabled;
        }
        if let Some(name) = self.string(section, &format!("{prefix}MountPointName"))? {
            toggle.point_name = name;
        }
        // An empty target names nothing; the previous target stays.
        if let Some(target) = self.string(section, &format!("{prefix}MountPointTarget"))? {
            if !target.is_empty() {
                toggle.target = Some(PathBuf::from(target));
            }
        }
        Ok(())
    }

    fn section<'m>(
        &self,
        object: &'m Map<String, Value>,
        key: &str,
    ) -> Result<Option<&'m Map<String, Value>>> {
        match lookup(object, key) {
            None => Ok(None),
            Some(Value::Object(section)) => Ok(Some(section)),
            Some(other) => Err(self.wrong_type(key, "object", other)),
        }
    }

    fn string(&self, object: &Map<String, Value>, key: &str) -> Result<Option<String>> {
        match lookup(object, key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(self.wrong_type(key, "string", other)),
        }
    }

    fn boolean(&self, object: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
        match lookup(object, key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.wrong_type(key, "boolean", other)),
        }
    }

    /// First present spelling among `keys`, which must be a string.
    fn required_string(&self, object: &Map<String, Value>, keys: &[&str]) -> Result<String> {
        for key in keys {
            if let Some(value) = self.string(object, key)? {
                return Ok(value);
            }
        }
        Err(Error::invalid_format(
            self.source,
            format!("mount point entry is missing `{}`", keys[0]),
        ))
    }

    fn names<'v>(&self, values: &'v [Value], key: &str) -> Result<Vec<&'v str>> {
        values
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.as_str()),
                other => Err(self.wrong_type(key, "array of strings", other)),
            })
            .collect()
    }

    fn wrong_type(&self, key: &str, expected: &str, got: &Value) -> Error {
        Error::invalid_format(
            self.source,
            format!("`{key}` must be a {expected}, got {}", type_name(got)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nut_vfs::MemoryFs;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn merge(doc: Value, manifest: &mut Manifest) -> Result<()> {
        let fs = MemoryFs::new();
        let env = BTreeMap::from([("HOME".to_string(), "/home/u".to_string())]);
        ManifestMerger::new(&fs, &env).merge_value(&doc, &VfsPath::new("/m.json"), manifest)
    }

    #[test]
    fn hyphenated_keys() {
        let mut m = Manifest::default();
        merge(
            json!({"app-group": "tools", "hotkeys": {"allow-fullscreen": false}}),
            &mut m,
        )
        .unwrap();
        assert_eq!(m.app_group, "tools");
        assert!(!m.hotkeys.allow_fullscreen);
        assert!(m.hotkeys.allow_reload_script);
    }

    #[test]
    fn unknown_graphics_mode_keeps_previous() {
        let mut m = Manifest::default();
        merge(json!({"graphicsMode": "preferQuality"}), &mut m).unwrap();
        merge(json!({"graphicsMode": "turbo"}), &mut m).unwrap();
        assert_eq!(m.graphics_mode, GraphicsMode::PreferQuality);
    }

    #[test]
    fn failed_merge_leaves_manifest_untouched() {
        let mut m = Manifest::default();
        let err = merge(json!({"appGroup": "x", "window": "big"}), &mut m).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
        assert_eq!(m, Manifest::default());
    }

    #[test]
    fn clear_then_import_then_variables() {
        let mut m = Manifest::default();
        m.variables.insert("OLD".into(), "1".into());
        merge(
            json!({
                "clearVariables": true,
                "importEnvironmentVariables": ["HOME", "MISSING"],
                "variables": {"HOME": "/override", "PORT": 8080}
            }),
            &mut m,
        )
        .unwrap();
        assert_eq!(
            m.variables,
            BTreeMap::from([
                ("HOME".to_string(), "/override".to_string()),
                ("PORT".to_string(), "8080".to_string()),
            ])
        );
    }

    #[test]
    fn mount_point_entries_need_name_and_target() {
        let mut m = Manifest::default();
        let err = merge(
            json!({"filesystem": {"mountPoints": [{"name": "data"}]}}),
            &mut m,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
    }

    #[test]
    fn toggle_target_and_name() {
        let mut m = Manifest::default();
        merge(
            json!({"filesystem": {
                "mountLocalFilesystem": true,
                "local-filesystem-mount-point-name": "disk",
                "homeMountPointTarget": "/srv/home"
            }}),
            &mut m,
        )
        .unwrap();
        assert!(m.filesystem.local_filesystem.enabled);
        assert_eq!(m.filesystem.local_filesystem.point_name, "disk");
        assert_eq!(m.filesystem.home.target, Some(PathBuf::from("/srv/home")));
    }
}
