//! MergeService: orchestrates sources, applies merge policy, deserializes to Settings.

use crate::config::sources::{environment, global_file};
use crate::config::Settings;
use config::{ConfigError, File};
use std::path::Path;

use super::builder_with_defaults;

/// Merge service for settings composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> user file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = match explicit {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
