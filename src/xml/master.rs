//! Master configuration file: the index of every algorithm configuration file.
//!
//! ```xml
//! <master_config>
//!   <config alg="genie::QELPXSec">QELPXSec.xml</config>
//!   <common_param_list name="Param">CommonParam.xml</common_param_list>
//! </master_config>
//! ```

use super::{required_attribute, structure_error, xml_error};
use crate::error::ParseError;
use std::path::Path;
use tracing::{debug, warn};

/// Basename of the master file, resolved through the XML search path.
pub const MASTER_CONFIG_FILE: &str = "master_config.xml";

/// One file listed by the master configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasterEntry {
    /// Per-algorithm parameter sets, keyed `<alg>/<param_set>`.
    Algorithm { alg: String, file: String },
    /// Shared parameter list, keyed `<id>List/<param_set>`.
    CommonList { id: String, file: String },
}

impl MasterEntry {
    pub fn file(&self) -> &str {
        match self {
            MasterEntry::Algorithm { file, .. } | MasterEntry::CommonList { file, .. } => file,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterConfig {
    pub entries: Vec<MasterEntry>,
    /// Entries dropped for a missing attribute or file name.
    pub skipped: usize,
}

/// Parse the master file.
///
/// Only a malformed document or a wrong root element fails the whole file. A
/// bad entry is logged and skipped so the other listed files still load.
pub fn parse_master_str(text: &str, path: &Path) -> Result<MasterConfig, ParseError> {
    let doc = roxmltree::Document::parse(text).map_err(|e| xml_error(path, e))?;
    let root = doc.root_element();
    if root.tag_name().name() != "master_config" {
        return Err(structure_error(
            path,
            format!("expected <master_config>, found <{}>", root.tag_name().name()),
        ));
    }

    let mut master = MasterConfig::default();
    for node in root.children().filter(|n| n.is_element()) {
        match parse_entry(node, path) {
            Ok(Some(entry)) => master.entries.push(entry),
            Ok(None) => {
                debug!(
                    file = %path.display(),
                    element = node.tag_name().name(),
                    "Skipping unsupported master config entry"
                );
            }
            Err(e) => {
                warn!(error = %e, "Skipping master config entry");
                master.skipped += 1;
            }
        }
    }

    Ok(master)
}

fn parse_entry(node: roxmltree::Node, path: &Path) -> Result<Option<MasterEntry>, ParseError> {
    let file = node.text().unwrap_or("").trim().to_string();
    let entry = match node.tag_name().name() {
        "config" => {
            let alg = required_attribute(node, "alg", path)?.to_string();
            if file.is_empty() {
                return Err(structure_error(path, format!("no file listed for {}", alg)));
            }
            MasterEntry::Algorithm { alg, file }
        }
        "common_param_list" => {
            let id = required_attribute(node, "name", path)?.to_string();
            if file.is_empty() {
                return Err(structure_error(path, format!("no file listed for {}List", id)));
            }
            MasterEntry::CommonList { id, file }
        }
        _ => return Ok(None),
    };
    Ok(Some(entry))
}
