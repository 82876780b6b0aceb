//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::Settings;
use config::ConfigError;
use std::path::{Path, PathBuf};

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Path of the per-user settings file (`$XDG_CONFIG_HOME/algconf/config.toml` on Linux).
    pub fn user_config_path() -> Option<PathBuf> {
        super::sources::global_file::path()
    }

    /// Load settings from the user file and environment.
    pub fn load() -> Result<Settings, ConfigError> {
        MergeService::load(None)
    }

    /// Load settings with an explicit file layered over the user file.
    pub fn load_from_file(path: &Path) -> Result<Settings, ConfigError> {
        MergeService::load(Some(path))
    }

    /// Create default settings.
    pub fn default() -> Settings {
        Settings::default()
    }
}
