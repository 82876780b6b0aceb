//! XML Configuration Files
//!
//! Reads algorithm configuration files (`<alg_conf>` / `<common_param_list>`)
//! into parameter sets, and the master file that lists them.

mod alg_conf;
mod master;

pub use alg_conf::{parse_config_str, ConfigFile, ConfigFileKind, ParamSet};
pub use master::{parse_master_str, MasterConfig, MasterEntry, MASTER_CONFIG_FILE};

use crate::error::ParseError;
use std::path::Path;

/// Parsing seam used by the pool during its bulk load.
pub trait ConfigParser {
    fn parse_master(&self, path: &Path) -> Result<MasterConfig, ParseError>;
    fn parse_config(&self, path: &Path) -> Result<ConfigFile, ParseError>;
}

/// Reads files from disk and parses them with `roxmltree`.
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlConfigParser;

impl ConfigParser for XmlConfigParser {
    fn parse_master(&self, path: &Path) -> Result<MasterConfig, ParseError> {
        let text = read_file(path)?;
        parse_master_str(&text, path)
    }

    fn parse_config(&self, path: &Path) -> Result<ConfigFile, ParseError> {
        let text = read_file(path)?;
        parse_config_str(&text, path)
    }
}

fn read_file(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn xml_error(path: &Path, err: roxmltree::Error) -> ParseError {
    ParseError::Xml {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn structure_error(path: &Path, message: impl Into<String>) -> ParseError {
    ParseError::Structure {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn required_attribute<'a>(
    node: roxmltree::Node<'a, '_>,
    attr: &str,
    path: &Path,
) -> Result<&'a str, ParseError> {
    node.attribute(attr)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            structure_error(
                path,
                format!("<{}> is missing attribute '{}'", node.tag_name().name(), attr),
            )
        })
}
