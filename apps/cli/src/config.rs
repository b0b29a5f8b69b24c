//! CLI configuration loading.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Paths and names the subcommands share.
///
/// Loaded from a TOML file when one exists; every field has a default so a
/// bare working directory works out of the box.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Root directory of the run registry.
    pub registry_root: PathBuf,
    /// Experiment all trials are grouped under.
    pub experiment: String,
    /// Persisted scaler state.
    pub scaler_path: PathBuf,
    /// Persisted preprocessed train/test splits.
    pub splits_path: PathBuf,
    /// Label column of the raw training CSV.
    pub label_column: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            registry_root: PathBuf::from("runs"),
            experiment: "credit_scoring".to_string(),
            scaler_path: PathBuf::from("data/scaler.json"),
            splits_path: PathBuf::from("data/splits.json"),
            label_column: riskline_core::DEFAULT_LABEL_COLUMN.to_string(),
        }
    }
}

impl CliConfig {
    /// Load from `path` if it exists, otherwise fall back to defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
