//! Error types
//!
//! `ApiError` is what every public operation returns. Parse and registry access
//! failures have their own enums and convert into it.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for path resolution, tune handling, and pool loading.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A tune was requested but no directory for it was found on the search path.
    #[error("tune {tune} is configured but not validated")]
    TuneNotValidated { tune: String },

    #[error("invalid tune name: {0}")]
    InvalidTune(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("no registry for {key}")]
    RegistryNotFound { key: String },

    #[error("could not resolve {basename} on the XML search path")]
    Unresolved { basename: String },

    #[error("failed to serialize output: {0}")]
    Serialization(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Failure to read or interpret one XML configuration file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed XML in {path}: {message}")]
    Xml { path: PathBuf, message: String },

    #[error("unexpected structure in {path}: {message}")]
    Structure { path: PathBuf, message: String },

    #[error("bad value for parameter {name} in {path}: {message}")]
    InvalidValue {
        path: PathBuf,
        name: String,
        message: String,
    },
}

/// Typed access to a registry item failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("registry {registry} has no item named {name}")]
    MissingKey { registry: String, name: String },

    #[error("item {name} in {registry} is {actual}, not {expected}")]
    TypeMismatch {
        registry: String,
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("registry {registry} is locked")]
    Locked { registry: String },
}
