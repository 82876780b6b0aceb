//! Configuration
//!
//! Two layers feed path resolution:
//! - [`Settings`]: what the user wrote down (settings file, `ALGCONF__*`
//!   environment overlay), loaded through [`ConfigLoader`].
//! - [`RunOptions`]: what this run uses after CLI flags are applied and the tune
//!   name has been decoded.

pub mod facade;
pub mod merge;
pub mod run_options;
pub mod sources;

pub use facade::ConfigLoader;
pub use run_options::RunOptions;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// User-level settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Extra search-path entries with the highest precedence.
    #[serde(default)]
    pub xml_path: Option<String>,

    /// Tune name, e.g. `G18_02a_00_000`.
    #[serde(default)]
    pub tune: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}
