//! Configuration Pool
//!
//! Holds every registry assembled from the XML configuration files, keyed by
//! `algorithm/param_set`. The whole configuration universe is loaded in one pass;
//! afterwards every lookup is a plain map read.
//!
//! A pool is an ordinary value: build one with [`ConfigPool::load`] at startup and
//! hand out references. Code that needs a process-wide handle can use
//! [`ConfigPool::initialize`] / [`ConfigPool::instance`], which install exactly
//! one pool per process.

mod load;

pub use load::LoadReport;

use crate::error::ApiError;
use crate::paths::XmlPathResolver;
use crate::registry::Registry;
use crate::types::{Algorithm, ConfigKey};
use crate::xml::{ConfigParser, XmlConfigParser};
use parking_lot::{const_mutex, Mutex};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::sync::OnceLock;

static INSTANCE: OnceLock<ConfigPool> = OnceLock::new();
static INIT_LOCK: Mutex<()> = const_mutex(());

/// Cache of parsed registries.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct ConfigPool {
    registries: BTreeMap<String, Registry>,
    #[serde(skip)]
    report: LoadReport,
}

impl ConfigPool {
    /// An empty pool. Lookups on it always miss.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a pool by loading every configuration file reachable from `resolver`.
    ///
    /// Individual unreadable files are skipped. The only error is an
    /// unvalidated tune, which makes the search path itself unusable.
    pub fn load(resolver: &XmlPathResolver) -> Result<Self, ApiError> {
        Self::load_with(resolver, &XmlConfigParser)
    }

    /// Same as [`load`](Self::load) with a caller-supplied parser.
    pub fn load_with(
        resolver: &XmlPathResolver,
        parser: &dyn ConfigParser,
    ) -> Result<Self, ApiError> {
        let mut pool = Self::empty();
        pool.report = pool.load_xml_config(resolver, parser)?;
        Ok(pool)
    }

    /// Install the process-wide pool from `resolver`, loading it on first call.
    ///
    /// Later calls return the installed pool and ignore `resolver`.
    pub fn initialize(resolver: &XmlPathResolver) -> Result<&'static ConfigPool, ApiError> {
        Self::get_or_load(|| Self::load(resolver))
    }

    /// The process-wide pool. On first call it is loaded from the process
    /// environment with default run options.
    pub fn instance() -> Result<&'static ConfigPool, ApiError> {
        Self::get_or_load(|| {
            let resolver = XmlPathResolver::from_process(Default::default());
            Self::load(&resolver)
        })
    }

    /// The process-wide pool if one has been installed.
    pub fn try_instance() -> Option<&'static ConfigPool> {
        INSTANCE.get()
    }

    fn get_or_load<F>(load: F) -> Result<&'static ConfigPool, ApiError>
    where
        F: FnOnce() -> Result<ConfigPool, ApiError>,
    {
        if let Some(pool) = INSTANCE.get() {
            return Ok(pool);
        }

        // Serialize first-time population; re-check after acquiring the lock.
        let _guard = INIT_LOCK.lock();
        if let Some(pool) = INSTANCE.get() {
            return Ok(pool);
        }
        let pool = load()?;
        Ok(INSTANCE.get_or_init(|| pool))
    }

    /// Registry for `(alg_name, param_set)`, if one was loaded.
    pub fn find_registry(&self, alg_name: &str, param_set: &str) -> Option<&Registry> {
        self.find_key(&ConfigKey::new(alg_name, param_set))
    }

    /// Registry for an algorithm's own identity.
    pub fn find_registry_for<A: Algorithm + ?Sized>(&self, algorithm: &A) -> Option<&Registry> {
        self.find_key(&algorithm.id().key())
    }

    /// Shared parameter list, keyed `<file_id>List/<set_name>`.
    pub fn common_list(&self, file_id: &str, set_name: &str) -> Option<&Registry> {
        self.find_key(&ConfigKey::common_list(file_id, set_name))
    }

    pub fn find_key(&self, key: &ConfigKey) -> Option<&Registry> {
        self.registries.get(key.as_str())
    }

    /// Like [`find_registry`](Self::find_registry) but a miss is an error.
    pub fn require_registry(&self, alg_name: &str, param_set: &str) -> Result<&Registry, ApiError> {
        self.find_registry(alg_name, param_set)
            .ok_or_else(|| ApiError::RegistryNotFound {
                key: ConfigKey::new(alg_name, param_set).into_string(),
            })
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.registries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Registry)> {
        self.registries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }

    /// Counters from the load pass that built this pool.
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Store a registry, replacing any previous one under the same key.
    fn insert(&mut self, key: ConfigKey, mut registry: Registry) {
        registry.lock();
        if self.registries.insert(key.to_string(), registry).is_some() {
            tracing::debug!(key = %key, "Replacing previously loaded registry");
        }
    }

    /// Write every key and registry to `writer`.
    pub fn print<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{}", self)
    }
}

impl fmt::Display for ConfigPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration pool: {} registries", self.registries.len())?;
        for (key, registry) in &self.registries {
            writeln!(f)?;
            writeln!(f, "{}", key)?;
            write!(f, "{}", registry)?;
        }
        Ok(())
    }
}
