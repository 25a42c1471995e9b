//! Environment variable source for manifest imports

use std::collections::BTreeMap;

/// Read access to a set of environment variables.
pub trait Environment: Send + Sync {
    /// Every variable currently set.
    fn vars(&self) -> Vec<(String, String)>;

    /// A single variable, `None` when unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment. Variables that are not valid Unicode are skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for BTreeMap<String, String> {
    fn vars(&self) -> Vec<(String, String)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
