//! Registry
//!
//! Ordered name -> typed value map holding one parameter set of one algorithm.
//! The pool owns every registry; callers only ever see shared references.

use crate::error::RegistryError;
use crate::types::AlgId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum RegistryItem {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    /// Reference to another algorithm configuration.
    Alg(AlgId),
}

impl RegistryItem {
    pub fn type_name(&self) -> &'static str {
        match self {
            RegistryItem::Bool(_) => "bool",
            RegistryItem::Int(_) => "int",
            RegistryItem::Double(_) => "double",
            RegistryItem::String(_) => "string",
            RegistryItem::Alg(_) => "alg",
        }
    }
}

impl fmt::Display for RegistryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryItem::Bool(v) => write!(f, "{}", v),
            RegistryItem::Int(v) => write!(f, "{}", v),
            RegistryItem::Double(v) => write!(f, "{}", v),
            RegistryItem::String(v) => write!(f, "\"{}\"", v),
            RegistryItem::Alg(id) => write!(f, "{}", id),
        }
    }
}

/// Parsed configuration block for one (algorithm, parameter set) pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    name: String,
    items: BTreeMap<String, RegistryItem>,
    #[serde(skip)]
    locked: bool,
}

impl Registry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: BTreeMap::new(),
            locked: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Forbid further `set` calls. The pool locks every registry it stores.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Insert or replace an item.
    pub fn set(&mut self, name: impl Into<String>, item: RegistryItem) -> Result<(), RegistryError> {
        if self.locked {
            return Err(RegistryError::Locked {
                registry: self.name.clone(),
            });
        }
        self.items.insert(name.into(), item);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegistryItem> {
        self.items.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    /// Items in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegistryItem)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn require(&self, name: &str) -> Result<&RegistryItem, RegistryError> {
        self.items.get(name).ok_or_else(|| RegistryError::MissingKey {
            registry: self.name.clone(),
            name: name.to_string(),
        })
    }

    fn mismatch(&self, name: &str, expected: &'static str, actual: &RegistryItem) -> RegistryError {
        RegistryError::TypeMismatch {
            registry: self.name.clone(),
            name: name.to_string(),
            expected,
            actual: actual.type_name(),
        }
    }

    pub fn get_bool(&self, name: &str) -> Result<bool, RegistryError> {
        match self.require(name)? {
            RegistryItem::Bool(v) => Ok(*v),
            other => Err(self.mismatch(name, "bool", other)),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<i64, RegistryError> {
        match self.require(name)? {
            RegistryItem::Int(v) => Ok(*v),
            other => Err(self.mismatch(name, "int", other)),
        }
    }

    /// Integers are widened, matching how parameter files mix `1` and `1.0`.
    pub fn get_double(&self, name: &str) -> Result<f64, RegistryError> {
        match self.require(name)? {
            RegistryItem::Double(v) => Ok(*v),
            RegistryItem::Int(v) => Ok(*v as f64),
            other => Err(self.mismatch(name, "double", other)),
        }
    }

    pub fn get_string(&self, name: &str) -> Result<&str, RegistryError> {
        match self.require(name)? {
            RegistryItem::String(v) => Ok(v),
            other => Err(self.mismatch(name, "string", other)),
        }
    }

    pub fn get_alg(&self, name: &str) -> Result<&AlgId, RegistryError> {
        match self.require(name)? {
            RegistryItem::Alg(id) => Ok(id),
            other => Err(self.mismatch(name, "alg", other)),
        }
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] ({} items)", self.name, self.items.len())?;
        for (name, item) in &self.items {
            writeln!(f, "  {:<30} {:<7} {}", name, item.type_name(), item)?;
        }
        Ok(())
    }
}
