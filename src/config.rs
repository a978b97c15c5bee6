//! Run configuration: input/output paths and the hyperparameter search space.
//!
//! Every key is optional in the TOML file; missing keys keep the defaults, so
//! a run without any config file behaves exactly like [`PipelineConfig::default`].

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::ml::grid::GridSearchOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Parsed values that cannot drive a search.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Settings for one pipeline run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Labeled passenger table.
    pub train: PathBuf,
    /// Unlabeled passenger table to predict.
    pub test: PathBuf,
    /// Submission CSV to write.
    pub output: PathBuf,
    pub search: SearchConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            train: PathBuf::from("data/train.csv"),
            test: PathBuf::from("data/test.csv"),
            output: PathBuf::from("data/submission.csv"),
            search: SearchConfig::default(),
        }
    }
}

/// `[search]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub n_estimators: Vec<usize>,
    pub max_depth: Vec<usize>,
    pub validation_fraction: f64,
    pub split_seed: u64,
    pub forest_seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let grid = GridSearchOptions::default();
        Self {
            n_estimators: grid.n_estimators,
            max_depth: grid.max_depth,
            validation_fraction: grid.validation_fraction,
            split_seed: grid.split_seed,
            forest_seed: grid.forest_seed,
        }
    }
}

impl SearchConfig {
    pub fn grid_options(&self) -> GridSearchOptions {
        GridSearchOptions {
            n_estimators: self.n_estimators.clone(),
            max_depth: self.max_depth.clone(),
            validation_fraction: self.validation_fraction,
            split_seed: self.split_seed,
            forest_seed: self.forest_seed,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.n_estimators.is_empty() || self.n_estimators.contains(&0) {
            return Err(ConfigError::Invalid(
                "search.n_estimators must list positive tree counts".to_string(),
            ));
        }
        if self.max_depth.is_empty() || self.max_depth.contains(&0) {
            return Err(ConfigError::Invalid(
                "search.max_depth must list positive depths".to_string(),
            ));
        }
        if !(self.validation_fraction > 0.0 && self.validation_fraction < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "search.validation_fraction must be in (0, 1), got {}",
                self.validation_fraction
            )));
        }
        Ok(())
    }
}

impl PipelineConfig {
    /// Parse and validate TOML text. `path` is only used in errors.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
        config.search.validate()?;
        Ok(config)
    }
}

/// Read a config file.
pub fn load_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    PipelineConfig::from_toml_str(&text, path)
}
