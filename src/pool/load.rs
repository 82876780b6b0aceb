//! Bulk load pass: master file, then every file it lists.

use super::ConfigPool;
use crate::error::ApiError;
use crate::paths::XmlPathResolver;
use crate::registry::Registry;
use crate::types::ConfigKey;
use crate::xml::{ConfigFileKind, ConfigParser, MasterEntry, MASTER_CONFIG_FILE};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// What one load pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Master file that was read, if it could be parsed.
    pub master_file: Option<PathBuf>,
    pub files_loaded: usize,
    pub files_skipped: usize,
    pub registries_loaded: usize,
}

impl ConfigPool {
    /// Read the master file and every configuration file it lists.
    ///
    /// Files that fail to resolve, read, or parse are logged and skipped so the
    /// rest of the configuration stays available. A missing master file leaves
    /// the pool empty.
    pub(super) fn load_xml_config(
        &mut self,
        resolver: &XmlPathResolver,
        parser: &dyn ConfigParser,
    ) -> Result<LoadReport, ApiError> {
        let mut report = LoadReport::default();

        let master_path = resolver.resolve_file(MASTER_CONFIG_FILE)?.into_path();
        let master = match parser.parse_master(&master_path) {
            Ok(master) => master,
            Err(e) => {
                error!(path = %master_path.display(), error = %e, "Could not load master configuration");
                return Ok(report);
            }
        };
        debug!(
            path = %master_path.display(),
            entries = master.entries.len(),
            "Read master configuration"
        );
        report.master_file = Some(master_path);
        report.files_skipped += master.skipped;

        for entry in &master.entries {
            let path = resolver.resolve_file(entry.file())?.into_path();
            let file = match parser.parse_config(&path) {
                Ok(file) => file,
                Err(e) => {
                    warn!(file = %entry.file(), error = %e, "Skipping configuration file");
                    report.files_skipped += 1;
                    continue;
                }
            };

            let expected = match entry {
                MasterEntry::Algorithm { .. } => ConfigFileKind::Algorithm,
                MasterEntry::CommonList { .. } => ConfigFileKind::CommonList,
            };
            if file.kind != expected {
                debug!(
                    path = %path.display(),
                    "Root element does not match how the master file lists it"
                );
            }

            for set in file.param_sets {
                let key = match entry {
                    MasterEntry::Algorithm { alg, .. } => ConfigKey::new(alg, &set.name),
                    MasterEntry::CommonList { id, .. } => ConfigKey::common_list(id, &set.name),
                };
                let mut registry = Registry::new(key.as_str());
                for (name, item) in set.items {
                    registry.set(name, item)?;
                }
                self.insert(key, registry);
                report.registries_loaded += 1;
            }
            report.files_loaded += 1;
        }

        info!(
            files_loaded = report.files_loaded,
            files_skipped = report.files_skipped,
            registries = self.len(),
            "Loaded algorithm configuration"
        );
        Ok(report)
    }
}
