//! Filesystem layout of the run registry.
//!
//! ```text
//! <root>/<experiment>/experiment.json
//! <root>/<experiment>/<run_id>/trial.json
//! <root>/<experiment>/<run_id>/artifact.json
//! ```

use crate::error::RegistryResult;
use crate::trial::RunId;
use std::path::{Path, PathBuf};

pub const EXPERIMENT_META_FILE: &str = "experiment.json";
pub const TRIAL_FILE: &str = "trial.json";
pub const ARTIFACT_FILE: &str = "artifact.json";

#[derive(Debug, Clone)]
pub struct RegistryLayout {
    root: PathBuf,
}

impl RegistryLayout {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn experiment_dir(&self, experiment: &str) -> PathBuf {
        self.root.join(experiment)
    }

    #[must_use]
    pub fn experiment_meta_path(&self, experiment: &str) -> PathBuf {
        self.experiment_dir(experiment).join(EXPERIMENT_META_FILE)
    }

    #[must_use]
    pub fn run_dir(&self, experiment: &str, run_id: &RunId) -> PathBuf {
        self.experiment_dir(experiment).join(run_id.0.as_str())
    }

    #[must_use]
    pub fn trial_path(&self, experiment: &str, run_id: &RunId) -> PathBuf {
        self.run_dir(experiment, run_id).join(TRIAL_FILE)
    }

    #[must_use]
    pub fn artifact_path(&self, experiment: &str, run_id: &RunId) -> PathBuf {
        self.run_dir(experiment, run_id).join(ARTIFACT_FILE)
    }

    /// Artifact path relative to the registry root, as stored in records.
    #[must_use]
    pub fn artifact_rel_path(&self, experiment: &str, run_id: &RunId) -> PathBuf {
        PathBuf::from(experiment).join(run_id.0.as_str()).join(ARTIFACT_FILE)
    }

    pub fn ensure_run_dir(&self, experiment: &str, run_id: &RunId) -> RegistryResult<()> {
        std::fs::create_dir_all(self.run_dir(experiment, run_id))?;
        Ok(())
    }
}
