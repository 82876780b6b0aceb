//! Search-path construction and basename resolution.

use super::environment::{GALGCONF, GENIE_REWEIGHT, GXMLPATH, GXMLPATHS};
use super::{expand_path_name, split_path_list, PathEnvironment, PathList, PathSource};
use crate::config::RunOptions;
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Compiled-in fallback directory, overridable at build time.
pub const DEFAULT_XML_PATH: &str = match option_env!("ALGCONF_DEFAULT_XML_PATH") {
    Some(path) => path,
    None => "$GENIE/config",
};

/// Flux driver configuration shipped next to its sources rather than in `config/`.
pub const FLUX_NTUPLE_PATH: &str = "$GENIE/src/Tools/Flux/GNuMINtuple";

/// Outcome of resolving a basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// `<directory>/<basename>` exists for the first matching candidate.
    Found(PathBuf),
    /// No candidate held the file. Carries the basename unchanged, so opening it
    /// falls back to the current working directory.
    Unresolved(String),
}

impl Resolution {
    pub fn found(&self) -> Option<&Path> {
        match self {
            Resolution::Found(path) => Some(path.as_path()),
            Resolution::Unresolved(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    /// The resolved path, or the bare basename when nothing matched.
    pub fn into_path(self) -> PathBuf {
        match self {
            Resolution::Found(path) => path,
            Resolution::Unresolved(basename) => PathBuf::from(basename),
        }
    }

    /// Fail with `ApiError::Unresolved` instead of falling back.
    pub fn require(self) -> Result<PathBuf, ApiError> {
        match self {
            Resolution::Found(path) => Ok(path),
            Resolution::Unresolved(basename) => Err(ApiError::Unresolved { basename }),
        }
    }
}

/// Resolves configuration files against the ordered XML search path.
#[derive(Debug, Clone)]
pub struct XmlPathResolver {
    env: PathEnvironment,
    options: RunOptions,
}

impl XmlPathResolver {
    pub fn new(env: PathEnvironment, options: RunOptions) -> Self {
        Self { env, options }
    }

    /// Resolver over the current process environment.
    pub fn from_process(options: RunOptions) -> Self {
        Self::new(PathEnvironment::from_process(), options)
    }

    pub fn environment(&self) -> &PathEnvironment {
        &self.env
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Build the search path, highest precedence first.
    ///
    /// With `add_tune` false the tune directories are left out; tune validation
    /// uses that form because it runs before the tune can be trusted.
    pub fn path_list(&self, add_tune: bool) -> Result<PathList, ApiError> {
        let mut list = PathList::new();

        if let Some(xml_path) = self.options.xml_path.as_deref().filter(|p| !p.is_empty()) {
            list.push(PathSource::RunOption, xml_path);
        }
        for var in [GXMLPATH, GXMLPATHS, GALGCONF] {
            if let Some(value) = self.env.get(var) {
                list.push(PathSource::Environment(var), value);
            }
        }

        if add_tune {
            if let Some(tune) = &self.options.tune {
                let (Some(cmc_dir), Some(tune_dir)) = (tune.cmc_directory(), tune.tune_directory())
                else {
                    return Err(ApiError::TuneNotValidated { tune: tune.name() });
                };
                if !tune.only_configuration() {
                    list.push(PathSource::TuneDirectory, tune_dir);
                }
                list.push(PathSource::CmcDirectory, cmc_dir);
            }
        }

        list.push(PathSource::Default, DEFAULT_XML_PATH);
        if let Some(reweight) = self.env.get(GENIE_REWEIGHT) {
            list.push(PathSource::Reweight, format!("{}/config", reweight));
        }
        list.push(PathSource::FluxNtuple, FLUX_NTUPLE_PATH);

        Ok(list)
    }

    /// Find the first search-path directory containing `basename`.
    ///
    /// An empty basename is returned as-is without consulting the search path.
    pub fn resolve_file(&self, basename: &str) -> Result<Resolution, ApiError> {
        if basename.is_empty() {
            return Ok(Resolution::Unresolved(String::new()));
        }

        let list = self.path_list(true)?;
        for candidate in split_path_list(&list.to_string()) {
            let Some(dir) = expand_path_name(&candidate, &self.env) else {
                trace!(candidate = %candidate, "Skipping search path entry with undefined variable");
                continue;
            };
            let path = candidate_file(dir, basename);
            if path.exists() {
                debug!(basename = %basename, path = %path.display(), "Resolved XML file");
                return Ok(Resolution::Found(path));
            }
        }

        debug!(basename = %basename, "Not found on XML search path, using bare name");
        Ok(Resolution::Unresolved(basename.to_string()))
    }

    /// String form of [`resolve_file`](Self::resolve_file) with the basename fallback.
    pub fn file_path(&self, basename: &str) -> Result<String, ApiError> {
        Ok(self
            .resolve_file(basename)?
            .into_path()
            .to_string_lossy()
            .into_owned())
    }

    /// Validate the configured tune against the tune-free search path.
    ///
    /// Does nothing without a tune. A tune that cannot be validated stays in the
    /// options, so later `path_list(true)` calls report `TuneNotValidated`.
    pub fn validate_tune(&mut self) -> Result<bool, ApiError> {
        if self.options.tune.is_none() {
            return Ok(true);
        }
        let candidates = self.path_list(false)?.directories();
        let env = &self.env;
        Ok(self
            .options
            .tune
            .as_mut()
            .map(|tune| tune.validate(&candidates, env))
            .unwrap_or(true))
    }
}

/// `<dir>/<basename>`; an entry that expanded to nothing probes the root.
fn candidate_file(dir: PathBuf, basename: &str) -> PathBuf {
    let mut joined = dir.into_os_string();
    joined.push("/");
    joined.push(basename);
    PathBuf::from(joined)
}
