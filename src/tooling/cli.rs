//! CLI Tooling
//!
//! Command-line interface for inspecting the XML search path and the
//! configuration pool. Every command is read-only.

use crate::config::{ConfigLoader, RunOptions, Settings};
use crate::error::ApiError;
use crate::paths::{PathEnvironment, XmlPathResolver};
use crate::pool::ConfigPool;
use crate::types::AlgId;
use clap::{Parser, Subcommand};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

/// Algconf CLI - XML configuration search path and registry inspection
#[derive(Parser)]
#[command(name = "algconf")]
#[command(about = "Resolve algorithm configuration files and inspect loaded registries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Search-path entries taking precedence over every environment variable
    #[arg(long, global = true)]
    pub xml_path: Option<String>,

    /// Tune name, e.g. G18_02a_00_000
    #[arg(long, global = true)]
    pub tune: Option<String>,

    /// Settings file (layered over the per-user settings file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the XML search path in precedence order
    PathList {
        /// Leave out tune directories
        #[arg(long)]
        no_tune: bool,

        /// Output format: text (one entry per line), joined, json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Resolve a file basename against the search path
    Resolve {
        basename: String,

        /// Fail instead of falling back to the bare basename
        #[arg(long)]
        strict: bool,
    },
    /// Print one registry
    Show {
        /// Algorithm name, or name/param_set
        alg: String,

        /// Parameter set (defaults to the one in ALG, else Default)
        param_set: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List loaded registry keys
    Keys,
    /// Print the whole configuration pool
    Dump {
        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective settings as TOML
    Settings,
}

/// CLI context: settings, resolver, and on-demand pool loading.
pub struct CliContext {
    settings: Settings,
    resolver: XmlPathResolver,
}

impl CliContext {
    /// Load settings and apply the logging flags from the command line.
    pub fn load_settings(cli: &Cli) -> Result<Settings, ApiError> {
        let mut settings = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        if let Some(level) = &cli.log_level {
            settings.logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            settings.logging.format = format.clone();
        }
        Ok(settings)
    }

    /// Create a context over the process environment.
    pub fn new(cli: &Cli, settings: Settings) -> Result<Self, ApiError> {
        Self::with_environment(cli, settings, PathEnvironment::from_process())
    }

    /// Create a context over an explicit environment snapshot.
    ///
    /// A configured tune is validated here; a tune that fails validation is
    /// kept so that commands needing the search path report it.
    pub fn with_environment(
        cli: &Cli,
        settings: Settings,
        env: PathEnvironment,
    ) -> Result<Self, ApiError> {
        let options =
            RunOptions::from_settings(&settings, cli.xml_path.as_deref(), cli.tune.as_deref())?;
        let mut resolver = XmlPathResolver::new(env, options);
        resolver.validate_tune()?;
        Ok(Self { settings, resolver })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn resolver(&self) -> &XmlPathResolver {
        &self.resolver
    }

    fn load_pool(&self) -> Result<ConfigPool, ApiError> {
        let pool = ConfigPool::load(&self.resolver)?;
        debug!(registries = pool.len(), "Configuration pool ready");
        Ok(pool)
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::PathList { no_tune, format } => {
                let list = self.resolver.path_list(!no_tune)?;
                match format.as_str() {
                    "text" => Ok(list.directories().join("\n")),
                    "joined" => Ok(list.to_string()),
                    "json" => to_json(&json!({
                        "path_list": list.to_string(),
                        "segments": list.segments(),
                        "directories": list.directories(),
                    })),
                    other => Err(invalid_format(other, &["text", "joined", "json"])),
                }
            }
            Commands::Resolve { basename, strict } => {
                let resolution = self.resolver.resolve_file(basename)?;
                let path = if *strict {
                    resolution.require()?
                } else {
                    resolution.into_path()
                };
                Ok(path.to_string_lossy().into_owned())
            }
            Commands::Show {
                alg,
                param_set,
                format,
            } => {
                let id = match param_set {
                    Some(set) => AlgId::new(alg.as_str(), set.as_str()),
                    None => AlgId::parse(alg),
                };
                let pool = self.load_pool()?;
                let registry = pool.require_registry(&id.name, &id.param_set)?;
                match format.as_str() {
                    "text" => Ok(registry.to_string().trim_end().to_string()),
                    "json" => to_json(registry),
                    other => Err(invalid_format(other, &["text", "json"])),
                }
            }
            Commands::Keys => {
                let pool = self.load_pool()?;
                if pool.is_empty() {
                    return Ok("No registries loaded.".to_string());
                }
                let mut table = Table::new();
                table.load_preset(UTF8_BORDERS_ONLY);
                table.set_header(vec!["Key", "Items"]);
                for (key, registry) in pool.iter() {
                    table.add_row(vec![key.to_string(), registry.len().to_string()]);
                }
                Ok(table.to_string())
            }
            Commands::Dump { format } => {
                let pool = self.load_pool()?;
                match format.as_str() {
                    "text" => Ok(pool.to_string().trim_end().to_string()),
                    "json" => to_json(&json!({
                        "report": pool.report(),
                        "registries": &pool,
                    })),
                    other => Err(invalid_format(other, &["text", "json"])),
                }
            }
            Commands::Settings => toml::to_string_pretty(&self.settings)
                .map_err(|e| ApiError::Serialization(e.to_string())),
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn invalid_format(format: &str, allowed: &[&str]) -> ApiError {
    ApiError::ConfigError(format!(
        "Invalid output format: {} (must be one of {})",
        format,
        allowed.join(", ")
    ))
}
