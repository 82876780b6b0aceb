//! Algorithm configuration file grammar.
//!
//! ```xml
//! <alg_conf>
//!   <param_set name="Default">
//!     <param type="double" name="Mass"> 0.938 </param>
//!   </param_set>
//! </alg_conf>
//! ```

use super::{required_attribute, structure_error, xml_error};
use crate::error::ParseError;
use crate::registry::RegistryItem;
use crate::types::AlgId;
use std::path::{Path, PathBuf};

/// Which root element the file had.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileKind {
    Algorithm,
    CommonList,
}

/// One `<param_set>` block.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSet {
    pub name: String,
    pub items: Vec<(String, RegistryItem)>,
}

/// A parsed configuration file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub kind: ConfigFileKind,
    pub param_sets: Vec<ParamSet>,
}

/// Parse the text of one configuration file. `path` is only used in errors.
pub fn parse_config_str(text: &str, path: &Path) -> Result<ConfigFile, ParseError> {
    let doc = roxmltree::Document::parse(text).map_err(|e| xml_error(path, e))?;
    let root = doc.root_element();

    let kind = match root.tag_name().name() {
        "alg_conf" => ConfigFileKind::Algorithm,
        "common_param_list" => ConfigFileKind::CommonList,
        other => {
            return Err(structure_error(
                path,
                format!("unexpected root element <{}>", other),
            ))
        }
    };

    let mut param_sets = Vec::new();
    for node in root.children().filter(|n| n.is_element()) {
        if node.tag_name().name() != "param_set" {
            tracing::debug!(
                file = %path.display(),
                element = node.tag_name().name(),
                "Ignoring element outside <param_set>"
            );
            continue;
        }
        param_sets.push(parse_param_set(node, path)?);
    }

    Ok(ConfigFile {
        path: path.to_path_buf(),
        kind,
        param_sets,
    })
}

fn parse_param_set(node: roxmltree::Node<'_, '_>, path: &Path) -> Result<ParamSet, ParseError> {
    let name = required_attribute(node, "name", path)?.to_string();
    let mut items = Vec::new();

    for param in node.children().filter(|n| n.is_element()) {
        if param.tag_name().name() != "param" {
            return Err(structure_error(
                path,
                format!(
                    "unexpected <{}> in param_set {}",
                    param.tag_name().name(),
                    name
                ),
            ));
        }
        let param_name = required_attribute(param, "name", path)?;
        let param_type = required_attribute(param, "type", path)?;
        let raw = param.text().unwrap_or("").trim();
        let item = parse_value(param_type, raw).map_err(|message| ParseError::InvalidValue {
            path: path.to_path_buf(),
            name: param_name.to_string(),
            message,
        })?;
        items.push((param_name.to_string(), item));
    }

    Ok(ParamSet { name, items })
}

/// Convert a trimmed text value according to its declared type.
pub(crate) fn parse_value(param_type: &str, raw: &str) -> Result<RegistryItem, String> {
    match param_type.to_ascii_lowercase().as_str() {
        "bool" => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(RegistryItem::Bool(true)),
            "false" | "0" => Ok(RegistryItem::Bool(false)),
            _ => Err(format!("'{}' is not a boolean", raw)),
        },
        "int" => raw
            .parse::<i64>()
            .map(RegistryItem::Int)
            .map_err(|e| format!("'{}' is not an integer: {}", raw, e)),
        "double" => raw
            .parse::<f64>()
            .map(RegistryItem::Double)
            .map_err(|e| format!("'{}' is not a number: {}", raw, e)),
        "string" => Ok(RegistryItem::String(raw.to_string())),
        "alg" => {
            if raw.is_empty() {
                Err("empty algorithm reference".to_string())
            } else {
                Ok(RegistryItem::Alg(AlgId::parse(raw)))
            }
        }
        other => Err(format!("unsupported parameter type '{}'", other)),
    }
}
