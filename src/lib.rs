//! Algconf: Algorithm Configuration Resolution
//!
//! Locates algorithm configuration files on an ordered XML search path built from
//! run options, environment variables, and tune directories, and caches the
//! parsed parameter registries keyed by `(algorithm, parameter set)`.

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod pool;
pub mod registry;
pub mod tooling;
pub mod tune;
pub mod types;
pub mod xml;

pub use config::RunOptions;
pub use error::ApiError;
pub use paths::{PathEnvironment, Resolution, XmlPathResolver};
pub use pool::ConfigPool;
pub use registry::{Registry, RegistryItem};
pub use tune::Tune;
pub use types::{AlgId, Algorithm, ConfigKey};
