//! Environment snapshot used for path construction and `$VAR` expansion.

use std::collections::BTreeMap;

/// Explicit search path, highest-priority environment source.
pub const GXMLPATH: &str = "GXMLPATH";
/// Plural spelling of `GXMLPATH`, accepted as well.
pub const GXMLPATHS: &str = "GXMLPATHS";
/// Legacy alias kept for older installations.
pub const GALGCONF: &str = "GALGCONF";
/// Installation root referenced by the default and auxiliary paths.
pub const GENIE: &str = "GENIE";
/// Reweighting package root; its `config/` directory joins the search path.
pub const GENIE_REWEIGHT: &str = "GENIE_REWEIGHT";

/// Immutable copy of the variables path resolution depends on.
///
/// Taking a snapshot instead of reading `std::env` on demand keeps every
/// resolution call a pure function of its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathEnvironment {
    vars: BTreeMap<String, String>,
}

impl PathEnvironment {
    /// Capture the current process environment. Non-UTF-8 entries are dropped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn home(&self) -> Option<&str> {
        self.get("HOME")
    }
}
