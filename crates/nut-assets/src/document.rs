//! Generic JSON/YAML document reader
//!
//! Text is tried as strict JSON first, then as JSON with `//` and `/* */`
//! comments removed, and finally as YAML. Whatever parses is returned as a
//! `serde_json::Value` tree so the resolvers only deal with one shape.

use std::fmt;

use nut_vfs::{FileSystem, VfsPath};
use serde::Serialize;
use serde_json::{Map, Value};
use serde_yaml::Value as YamlValue;

use crate::{Error, Result};

/// The format a document was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Json,
    Yaml,
    Unknown,
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Yaml => write!(f, "YAML"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Why a document could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDiagnostic {
    pub format: DocumentFormat,
    pub message: String,
    /// Best-effort JSON rendering of whatever was parsed
    pub canonical_json: Option<String>,
}

impl fmt::Display for FormatDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.message)?;
        if let Some(json) = &self.canonical_json {
            write!(f, "\nJSON:\n{json}")?;
        }
        Ok(())
    }
}

/// A parsed JSON/YAML document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub format: DocumentFormat,
    pub root: Value,
}

impl Document {
    /// Parse document text, JSON first, YAML as fallback.
    pub fn parse(text: &str) -> std::result::Result<Self, FormatDiagnostic> {
        if text.trim().is_empty() {
            return Ok(Self {
                format: DocumentFormat::Yaml,
                root: Value::Null,
            });
        }

        let json_err = match serde_json::from_str::<Value>(text) {
            Ok(root) => {
                return Ok(Self {
                    format: DocumentFormat::Json,
                    root,
                });
            }
            Err(e) => e,
        };

        let stripped = strip_comments(text);
        if stripped != text {
            if let Ok(root) = serde_json::from_str::<Value>(&stripped) {
                return Ok(Self {
                    format: DocumentFormat::Json,
                    root,
                });
            }
        }

        match serde_yaml::from_str::<YamlValue>(text) {
            Ok(yaml) => {
                let mut problems = Vec::new();
                let root = yaml_to_json(&yaml, &mut problems);
                if problems.is_empty() {
                    Ok(Self {
                        format: DocumentFormat::Yaml,
                        root,
                    })
                } else {
                    Err(FormatDiagnostic {
                        format: DocumentFormat::Unknown,
                        message: problems.join("; "),
                        canonical_json: serde_json::to_string_pretty(&root).ok(),
                    })
                }
            }
            Err(yaml_err) => Err(FormatDiagnostic {
                format: DocumentFormat::Unknown,
                message: format!("not JSON ({json_err}), not YAML ({yaml_err})"),
                canonical_json: None,
            }),
        }
    }

    /// Take the root as an object; `null` counts as an empty object.
    pub fn into_object(self, source: &VfsPath) -> Result<Map<String, Value>> {
        match self.root {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Map::new()),
            other => Err(Error::invalid_format(
                source,
                format!("document root must be an object, got {}", type_name(&other)),
            )),
        }
    }
}

/// Read and parse a document from the virtual filesystem.
///
/// Fails with `NotFound` when the file is absent and `UnknownFormat`
/// (diagnostic attached) when neither reader accepts the text.
pub fn read_document(fs: &dyn FileSystem, path: &VfsPath) -> Result<Document> {
    if !fs.is_file_exist_and_readable(path) {
        return Err(Error::NotFound { path: path.clone() });
    }
    let text = fs.read_text_file(path)?;
    Document::parse(&text).map_err(|diagnostic| {
        tracing::warn!("{}: {}", path, diagnostic);
        Error::UnknownFormat {
            path: path.clone(),
            diagnostic: Box::new(diagnostic),
        }
    })
}

/// Look a key up by its camelCase spelling, then by its hyphenated one.
///
/// `lookup(obj, "allowFullscreen")` also finds `allow-fullscreen`.
pub fn lookup<'a>(object: &'a Map<String, Value>, camel: &str) -> Option<&'a Value> {
    object
        .get(camel)
        .or_else(|| object.get(hyphenate(camel).as_str()))
}

/// `mountHome` -> `mount-home`
pub fn hyphenate(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for ch in camel.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Human readable JSON type name for diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Remove `//` line comments and `/* */` block comments outside strings.
///
/// Newlines are kept so parser line numbers still point at the source.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            match ch {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (ch, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for c in chars.by_ref() {
                    if c == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && c == '/' {
                        break;
                    }
                    prev = c;
                }
                out.push(' ');
            }
            _ => out.push(ch),
        }
    }
    out
}

fn yaml_to_json(value: &YamlValue, problems: &mut Vec<String>) -> Value {
    match value {
        YamlValue::Null => Value::Null,
        YamlValue::Bool(b) => Value::Bool(*b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            } else {
                Value::Null
            }
        }
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Sequence(items) => {
            Value::Array(items.iter().map(|v| yaml_to_json(v, problems)).collect())
        }
        YamlValue::Mapping(map) => {
            let mut object = Map::new();
            for (key, v) in map {
                let key = match key {
                    YamlValue::String(s) => s.clone(),
                    YamlValue::Number(n) => n.to_string(),
                    YamlValue::Bool(b) => b.to_string(),
                    other => {
                        problems.push(format!("unsupported mapping key {other:?}"));
                        continue;
                    }
                };
                object.insert(key, yaml_to_json(v, problems));
            }
            Value::Object(object)
        }
        YamlValue::Tagged(tagged) => yaml_to_json(&tagged.value, problems),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strict_json_is_json() {
        let doc = Document::parse(r#"{"files": ["a.nut"]}"#).unwrap();
        assert_eq!(doc.format, DocumentFormat::Json);
        assert_eq!(doc.root, json!({"files": ["a.nut"]}));
    }

    #[test]
    fn commented_json_is_still_json() {
        let text = r#"{
            // project files
            "files": ["a.nut", /* inline */ "http://x/b.nut"]
        }"#;
        let doc = Document::parse(text).unwrap();
        assert_eq!(doc.format, DocumentFormat::Json);
        assert_eq!(doc.root, json!({"files": ["a.nut", "http://x/b.nut"]}));
    }

    #[test]
    fn yaml_fallback() {
        let doc = Document::parse("files:\n  - a.nut\n  - b.nut\n").unwrap();
        assert_eq!(doc.format, DocumentFormat::Yaml);
        assert_eq!(doc.root, json!({"files": ["a.nut", "b.nut"]}));
    }

    #[test]
    fn unparseable_text_is_unknown() {
        let diag = Document::parse(r#"{"files": ["a.nut""#).unwrap_err();
        assert_eq!(diag.format, DocumentFormat::Unknown);
        assert!(diag.to_string().starts_with("error: "));
    }

    #[test]
    fn complex_yaml_keys_keep_partial_rendering() {
        let diag = Document::parse("? [a, b]\n: 1\nok: 2\n").unwrap_err();
        assert_eq!(diag.format, DocumentFormat::Unknown);
        let json = diag.canonical_json.unwrap();
        assert!(json.contains("\"ok\": 2"));
    }

    #[test]
    fn empty_text_is_null() {
        let doc = Document::parse("  \n").unwrap();
        assert_eq!(doc.root, Value::Null);
    }

    #[test]
    fn lookup_tries_both_spellings() {
        let obj = json!({"allow-fullscreen": false});
        let map = obj.as_object().unwrap();
        assert_eq!(lookup(map, "allowFullscreen"), Some(&json!(false)));
        assert_eq!(lookup(map, "runFullscreen"), None);
    }

    #[test]
    fn scalar_root_is_not_an_object() {
        let doc = Document::parse("just words").unwrap();
        let err = doc.into_object(&VfsPath::new("/x.json")).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat { .. }));
    }
}
