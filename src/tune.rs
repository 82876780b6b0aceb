//! Tunes
//!
//! A tune is a named bundle of parameter-set overrides such as `G18_02a_00_000`.
//! Its files live under a comprehensive model configuration (CMC) directory,
//! `<base>/G18_02a`, optionally with a tune-specific sub-directory
//! `<base>/G18_02a/G18_02a_00_000`. A tune must be validated, which means its CMC
//! directory was found on the tune-free search path, before it can contribute
//! directories to the search path.

use crate::error::ApiError;
use crate::paths::{expand_path_name, PathEnvironment};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Decoded tune name: `<Prefix><Year>_<Major><Minor>_<TunedSet>_<FitSet>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TuneId {
    prefix: char,
    year: String,
    major_model: String,
    minor_model: String,
    tuned_param_set: String,
    fit_data_set: String,
}

impl TuneId {
    pub fn parse(name: &str) -> Result<Self, ApiError> {
        let invalid = || ApiError::InvalidTune(name.to_string());
        let parts: Vec<&str> = name.trim().split('_').collect();
        let [head, model, tuned, fit] = parts.as_slice() else {
            return Err(invalid());
        };

        let mut head_chars = head.chars();
        let prefix = head_chars.next().filter(|c| c.is_ascii_uppercase()).ok_or_else(invalid)?;
        let year = head_chars.as_str();
        if !is_digits(year, 2) {
            return Err(invalid());
        }

        if model.len() < 3 || !model.is_ascii() {
            return Err(invalid());
        }
        let (major, minor) = model.split_at(2);
        if !is_digits(major, 2) || minor.is_empty() || !minor.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(invalid());
        }

        if tuned.len() != 2 || !tuned.chars().all(is_lower_alnum) {
            return Err(invalid());
        }
        if fit.len() != 3 || !fit.chars().all(is_lower_alnum) {
            return Err(invalid());
        }

        Ok(Self {
            prefix,
            year: year.to_string(),
            major_model: major.to_string(),
            minor_model: minor.to_string(),
            tuned_param_set: tuned.to_string(),
            fit_data_set: fit.to_string(),
        })
    }

    /// Comprehensive model configuration, e.g. `G18_02a`.
    pub fn cmc(&self) -> String {
        format!(
            "{}{}_{}{}",
            self.prefix, self.year, self.major_model, self.minor_model
        )
    }

    pub fn tuned_param_set(&self) -> &str {
        &self.tuned_param_set
    }

    pub fn fit_data_set(&self) -> &str {
        &self.fit_data_set
    }
}

impl fmt::Display for TuneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.cmc(), self.tuned_param_set, self.fit_data_set)
    }
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_digit())
}

fn is_lower_alnum(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_lowercase()
}

/// A configured tune and what validation learned about its directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tune {
    id: TuneId,
    /// Expanded CMC directory, set once validated.
    cmc_directory: Option<String>,
    only_configuration: bool,
}

impl Tune {
    pub fn new(name: &str) -> Result<Self, ApiError> {
        Ok(Self {
            id: TuneId::parse(name)?,
            cmc_directory: None,
            only_configuration: false,
        })
    }

    pub fn id(&self) -> &TuneId {
        &self.id
    }

    pub fn name(&self) -> String {
        self.id.to_string()
    }

    pub fn is_validated(&self) -> bool {
        self.cmc_directory.is_some()
    }

    /// Only the CMC directory exists; there is no tune-specific sub-directory.
    pub fn only_configuration(&self) -> bool {
        self.only_configuration
    }

    pub fn cmc_directory(&self) -> Option<&str> {
        self.cmc_directory.as_deref()
    }

    pub fn tune_directory(&self) -> Option<String> {
        self.cmc_directory
            .as_ref()
            .map(|cmc| format!("{}/{}", cmc, self.id))
    }

    /// Look for the CMC directory under each candidate, in order.
    ///
    /// The candidates must come from the search path built without tune
    /// directories. Returns whether the tune is now validated.
    pub fn validate(&mut self, candidates: &[String], env: &PathEnvironment) -> bool {
        let cmc = self.id.cmc();
        for candidate in candidates {
            let Some(base) = expand_path_name(candidate, env) else {
                continue;
            };
            let cmc_dir = base.join(&cmc);
            if !cmc_dir.is_dir() {
                continue;
            }
            let cmc_dir = cmc_dir.to_string_lossy().into_owned();
            self.only_configuration = !Path::new(&cmc_dir).join(self.id.to_string()).is_dir();
            tracing::info!(
                tune = %self.id,
                cmc_directory = %cmc_dir,
                only_configuration = self.only_configuration,
                "Tune validated"
            );
            self.cmc_directory = Some(cmc_dir);
            return true;
        }

        tracing::warn!(tune = %self.id, cmc = %cmc, "No directory found for tune");
        self.cmc_directory = None;
        self.only_configuration = false;
        false
    }
}
