//! Effective options for one run: settings with CLI overrides applied.

use super::Settings;
use crate::error::ApiError;
use crate::tune::Tune;

/// Run-wide options consulted by path resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// `--xml-path` value; highest-precedence search-path entries.
    pub xml_path: Option<String>,
    /// Configured tune, validated or not.
    pub tune: Option<Tune>,
}

impl RunOptions {
    pub fn with_xml_path(mut self, xml_path: impl Into<String>) -> Self {
        self.xml_path = Some(xml_path.into());
        self
    }

    pub fn with_tune(mut self, tune: Tune) -> Self {
        self.tune = Some(tune);
        self
    }

    /// Combine settings with CLI values; CLI values win.
    pub fn from_settings(
        settings: &Settings,
        cli_xml_path: Option<&str>,
        cli_tune: Option<&str>,
    ) -> Result<Self, ApiError> {
        let xml_path = cli_xml_path
            .map(str::to_string)
            .or_else(|| settings.xml_path.clone())
            .filter(|p| !p.is_empty());
        let tune = match cli_tune.or(settings.tune.as_deref()) {
            Some(name) if !name.trim().is_empty() => Some(Tune::new(name)?),
            _ => None,
        };
        Ok(Self { xml_path, tune })
    }

    pub fn is_tune_configured(&self) -> bool {
        self.tune.is_some()
    }
}
