//! Rooted, normalized paths inside the virtual filesystem

use serde::Serialize;

/// A path inside the virtual filesystem.
///
/// There is no notion of a current directory: every path is rooted at `/`,
/// and a path written without a leading separator is still taken from the
/// root. Backslashes are converted to forward slashes, empty and `.`
/// components are dropped and `..` pops the previous component (never above
/// the root).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VfsPath {
    /// Always starts with `/`, never ends with one unless it is the root
    inner: String,
}

impl VfsPath {
    /// Create a normalized path from any string input.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            inner: normalize(path.as_ref()),
        }
    }

    /// The virtual root, `/`.
    pub fn root() -> Self {
        Self {
            inner: "/".to_string(),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn is_root(&self) -> bool {
        self.inner == "/"
    }

    /// Iterate over the path components, root excluded.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|c| !c.is_empty())
    }

    /// Get the parent directory, `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.inner.rfind('/') {
            Some(0) | None => Some(Self::root()),
            Some(idx) => Some(Self {
                inner: self.inner[..idx].to_string(),
            }),
        }
    }

    /// Directory part of the path; the root is its own directory.
    pub fn dir(&self) -> Self {
        self.parent().unwrap_or_else(Self::root)
    }

    /// Get the file name component (name and extension).
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.inner.rsplit('/').next()
    }

    /// Get the last extension if present, without the dot.
    ///
    /// `lib.nuts.json` has the extension `json`; `.hidden` has none.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// File name without its last extension.
    pub fn stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }

    /// Directory and stem, i.e. the full path with the last extension removed.
    pub fn without_extension(&self) -> Self {
        match self.extension() {
            Some(ext) => Self {
                inner: self.inner[..self.inner.len() - ext.len() - 1].to_string(),
            },
            None => self.clone(),
        }
    }

    /// Append a path segment.
    ///
    /// A segment starting with a separator is rooted and replaces this path
    /// entirely. Otherwise it is resolved relative to this path, `..`
    /// components included.
    pub fn join(&self, segment: &str) -> Self {
        if segment.starts_with('/') || segment.starts_with('\\') {
            return Self::new(segment);
        }
        Self::new(format!("{}/{}", self.inner, segment))
    }

    /// Append an extension; a leading dot on `ext` is optional.
    ///
    /// `VfsPath::new("/nuts/demo").with_appended_ext("nuts.json")` gives
    /// `/nuts/demo.nuts.json`.
    pub fn with_appended_ext(&self, ext: &str) -> Self {
        let ext = ext.trim_start_matches('.');
        if ext.is_empty() {
            return self.clone();
        }
        Self::new(format!("{}.{}", self.inner, ext))
    }

    /// Key used for case-insensitive comparisons and deduplication.
    pub fn case_key(&self) -> String {
        self.inner.to_lowercase()
    }

    pub fn eq_ignore_case(&self, other: &VfsPath) -> bool {
        self.case_key() == other.case_key()
    }
}

fn normalize(raw: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for component in raw.split(['/', '\\']) {
        match component {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    format!("/{}", parts.join("/"))
}

impl Default for VfsPath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for VfsPath {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl std::fmt::Display for VfsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for VfsPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for VfsPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&String> for VfsPath {
    fn from(s: &String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_input_is_rooted() {
        assert_eq!(VfsPath::new("nuts/a.nut").as_str(), "/nuts/a.nut");
    }

    #[test]
    fn parent_of_top_level_entry_is_root() {
        let path = VfsPath::new("/a.nut");
        assert_eq!(path.parent(), Some(VfsPath::root()));
        assert_eq!(VfsPath::root().parent(), None);
    }

    #[test]
    fn without_extension_strips_last_only() {
        let path = VfsPath::new("/nuts/lib.nuts.json");
        assert_eq!(path.without_extension().as_str(), "/nuts/lib.nuts");
        assert_eq!(path.stem(), Some("lib.nuts"));
    }

    #[test]
    fn append_ext_accepts_leading_dot() {
        let base = VfsPath::new("/nuts/demo");
        assert_eq!(base.with_appended_ext(".nut").as_str(), "/nuts/demo.nut");
        assert_eq!(base.with_appended_ext("nut").as_str(), "/nuts/demo.nut");
    }

    #[test]
    fn case_key_ignores_case() {
        let a = VfsPath::new("/Nuts/A.NUT");
        let b = VfsPath::new("/nuts/a.nut");
        assert!(a.eq_ignore_case(&b));
        assert_ne!(a, b);
    }
}
