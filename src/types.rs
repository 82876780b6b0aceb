//! Core identity types for algorithm configurations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameter set used when a caller does not name one.
pub const DEFAULT_PARAM_SET: &str = "Default";

/// Identity of one configurable algorithm: name plus parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlgId {
    pub name: String,
    pub param_set: String,
}

impl AlgId {
    pub fn new(name: impl Into<String>, param_set: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_set: param_set.into(),
        }
    }

    /// Parse `"name/param_set"`. A bare name gets the default parameter set.
    ///
    /// The split is on the last `/`, so names may themselves contain slashes.
    pub fn parse(text: &str) -> Self {
        match text.trim().rsplit_once('/') {
            Some((name, param_set)) if !param_set.is_empty() => Self::new(name, param_set),
            Some((name, _)) => Self::new(name, DEFAULT_PARAM_SET),
            None => Self::new(text.trim(), DEFAULT_PARAM_SET),
        }
    }

    /// Composite cache key for this identity.
    pub fn key(&self) -> ConfigKey {
        ConfigKey::new(&self.name, &self.param_set)
    }
}

impl fmt::Display for AlgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.param_set)
    }
}

/// Serialized `(algorithm, parameter set)` key used by the pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConfigKey(String);

impl ConfigKey {
    pub fn new(alg_name: &str, param_set: &str) -> Self {
        ConfigKey(format!("{}/{}", alg_name, param_set))
    }

    /// Key for a shared parameter list, e.g. `ParamList/Default`.
    pub fn common_list(file_id: &str, set_name: &str) -> Self {
        ConfigKey(format!("{}List/{}", file_id, set_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Anything that knows its own configuration identity.
pub trait Algorithm {
    fn id(&self) -> &AlgId;
}

impl Algorithm for AlgId {
    fn id(&self) -> &AlgId {
        self
    }
}
