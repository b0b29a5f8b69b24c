//! The run registry store.
//!
//! Appends are the only writes: a trial's artifact is written first, then
//! the trial record is published with a temp-file + rename, so a reader
//! scanning the experiment never observes a partially written record.

use crate::error::{RegistryError, RegistryResult};
use crate::layout::{RegistryLayout, TRIAL_FILE};
use crate::trial::{ArtifactRef, RunId, TrialRecord};
use chrono::{DateTime, Utc};
use riskline_models::TrainedClassifier;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentMeta {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Handle on a registry root directory.
#[derive(Debug, Clone)]
pub struct RunRegistry {
    layout: RegistryLayout,
}

impl RunRegistry {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { layout: RegistryLayout::new(root.into()) }
    }

    #[must_use]
    pub fn layout(&self) -> &RegistryLayout {
        &self.layout
    }

    /// Look up an experiment, creating it if it does not exist yet.
    pub fn create_experiment(&self, name: &str) -> RegistryResult<ExperimentMeta> {
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(RegistryError::Trial(format!("invalid experiment name: {name:?}")));
        }
        let meta_path = self.layout.experiment_meta_path(name);
        if meta_path.exists() {
            let bytes = std::fs::read(&meta_path)?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        std::fs::create_dir_all(self.layout.experiment_dir(name))?;
        let meta = ExperimentMeta { name: name.to_string(), created_at: Utc::now() };
        std::fs::write(&meta_path, serde_json::to_string_pretty(&meta)?)?;
        tracing::info!(experiment = name, "experiment created");
        Ok(meta)
    }

    fn require_experiment(&self, name: &str) -> RegistryResult<()> {
        if self.layout.experiment_meta_path(name).exists() {
            Ok(())
        } else {
            Err(RegistryError::ExperimentNotFound(name.to_string()))
        }
    }

    /// Append one trial: artifact first, record last.
    ///
    /// The record is written to a temp file in the run directory and
    /// renamed into place; rename is the publish point.
    pub fn log_trial(
        &self,
        experiment: &str,
        run_name: &str,
        params: BTreeMap<String, String>,
        metrics: BTreeMap<String, f64>,
        classifier: &TrainedClassifier,
    ) -> RegistryResult<TrialRecord> {
        self.require_experiment(experiment)?;

        let run_id = RunId::new();
        self.layout.ensure_run_dir(experiment, &run_id)?;

        let artifact_bytes = serde_json::to_vec(classifier)?;
        let artifact_path = self.layout.artifact_path(experiment, &run_id);
        std::fs::write(&artifact_path, &artifact_bytes)?;

        let mut hasher = Sha256::new();
        hasher.update(&artifact_bytes);
        let artifact = ArtifactRef {
            path: self.layout.artifact_rel_path(experiment, &run_id),
            sha256: hex::encode(hasher.finalize()),
        };

        let trial = TrialRecord {
            experiment: experiment.to_string(),
            run_id: run_id.clone(),
            run_name: run_name.to_string(),
            created_at: Utc::now(),
            params,
            metrics,
            artifact,
        };

        let tmp_path = self.layout.run_dir(experiment, &run_id).join(".trial.json.tmp");
        std::fs::write(&tmp_path, serde_json::to_string_pretty(&trial)?)?;
        std::fs::rename(&tmp_path, self.layout.trial_path(experiment, &run_id))?;

        tracing::info!(experiment, run = %run_id, name = run_name, "trial recorded");
        Ok(trial)
    }

    /// All trials recorded under `experiment`, ordered by creation time
    /// then run id.
    ///
    /// Run directories without a published `trial.json` are in-flight
    /// appends and are skipped.
    pub fn query_trials(&self, experiment: &str) -> RegistryResult<Vec<TrialRecord>> {
        self.require_experiment(experiment)?;

        let mut trials = Vec::new();
        for entry in std::fs::read_dir(self.layout.experiment_dir(experiment))? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let trial_path = entry.path().join(TRIAL_FILE);
            if !trial_path.exists() {
                continue;
            }
            let bytes = std::fs::read(&trial_path)?;
            let trial: TrialRecord = serde_json::from_slice(&bytes).map_err(|e| {
                RegistryError::Trial(format!(
                    "corrupt trial record {}: {e}",
                    trial_path.display()
                ))
            })?;
            trials.push(trial);
        }

        trials.sort_by(|a, b| {
            a.created_at.cmp(&b.created_at).then_with(|| a.run_id.cmp(&b.run_id))
        });
        Ok(trials)
    }

    /// Retrieve and deserialize the classifier a trial references,
    /// verifying the recorded digest.
    pub fn load_artifact(&self, trial: &TrialRecord) -> RegistryResult<TrainedClassifier> {
        let path = self.layout.root().join(&trial.artifact.path);
        let bytes = std::fs::read(&path).map_err(|e| RegistryError::ArtifactLoadFailure {
            run_id: trial.run_id.to_string(),
            reason: format!("{}: {e}", path.display()),
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());
        if digest != trial.artifact.sha256 {
            return Err(RegistryError::ArtifactLoadFailure {
                run_id: trial.run_id.to_string(),
                reason: format!(
                    "digest mismatch: recorded {}, found {digest}",
                    trial.artifact.sha256
                ),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| RegistryError::ArtifactLoadFailure {
            run_id: trial.run_id.to_string(),
            reason: format!("deserialize: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::ACCURACY_METRIC;
    use riskline_models::{LogisticConfig, LogisticRegression};
    use tempfile::TempDir;

    fn classifier() -> TrainedClassifier {
        let x = vec![vec![-1.0], vec![1.0], vec![-2.0], vec![2.0]];
        let y = vec![0, 1, 0, 1];
        TrainedClassifier::Logistic(
            LogisticRegression::fit(&LogisticConfig::default(), &x, &y).unwrap(),
        )
    }

    fn metrics(accuracy: f64) -> BTreeMap<String, f64> {
        BTreeMap::from([(ACCURACY_METRIC.to_string(), accuracy)])
    }

    #[test]
    fn test_create_experiment_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let registry = RunRegistry::new(temp.path());

        let first = registry.create_experiment("credit_scoring").unwrap();
        let second = registry.create_experiment("credit_scoring").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_query_unknown_experiment_fails() {
        let temp = TempDir::new().unwrap();
        let registry = RunRegistry::new(temp.path());
        assert!(matches!(
            registry.query_trials("nope"),
            Err(RegistryError::ExperimentNotFound(_))
        ));
    }

    #[test]
    fn test_log_trial_requires_experiment() {
        let temp = TempDir::new().unwrap();
        let registry = RunRegistry::new(temp.path());
        let result = registry.log_trial(
            "missing",
            "logistic_regression",
            BTreeMap::new(),
            metrics(0.8),
            &classifier(),
        );
        assert!(matches!(result, Err(RegistryError::ExperimentNotFound(_))));
    }

    #[test]
    fn test_log_and_query_round_trip() {
        let temp = TempDir::new().unwrap();
        let registry = RunRegistry::new(temp.path());
        registry.create_experiment("credit_scoring").unwrap();

        let logged = registry
            .log_trial(
                "credit_scoring",
                "logistic_regression",
                BTreeMap::from([("max_iter".to_string(), "1000".to_string())]),
                metrics(0.81),
                &classifier(),
            )
            .unwrap();

        let trials = registry.query_trials("credit_scoring").unwrap();
        assert_eq!(trials, vec![logged]);
        assert_eq!(trials[0].accuracy(), Some(0.81));
    }

    #[test]
    fn test_load_artifact_round_trip() {
        let temp = TempDir::new().unwrap();
        let registry = RunRegistry::new(temp.path());
        registry.create_experiment("credit_scoring").unwrap();

        let model = classifier();
        let trial = registry
            .log_trial("credit_scoring", "logistic_regression", BTreeMap::new(), metrics(0.8), &model)
            .unwrap();

        let loaded = registry.load_artifact(&trial).unwrap();
        assert_eq!(loaded.predict_proba(&[1.5]).unwrap(), model.predict_proba(&[1.5]).unwrap());
    }

    #[test]
    fn test_tampered_artifact_fails_digest_check() {
        let temp = TempDir::new().unwrap();
        let registry = RunRegistry::new(temp.path());
        registry.create_experiment("credit_scoring").unwrap();

        let trial = registry
            .log_trial("credit_scoring", "logistic_regression", BTreeMap::new(), metrics(0.8), &classifier())
            .unwrap();

        let artifact_path = temp.path().join(&trial.artifact.path);
        std::fs::write(&artifact_path, b"{\"family\":\"logistic\"}").unwrap();

        assert!(matches!(
            registry.load_artifact(&trial),
            Err(RegistryError::ArtifactLoadFailure { .. })
        ));
    }

    #[test]
    fn test_unpublished_run_dir_is_invisible() {
        let temp = TempDir::new().unwrap();
        let registry = RunRegistry::new(temp.path());
        registry.create_experiment("credit_scoring").unwrap();
        registry
            .log_trial("credit_scoring", "logistic_regression", BTreeMap::new(), metrics(0.8), &classifier())
            .unwrap();

        // Simulate a concurrent append that has not published its record.
        let in_flight = temp.path().join("credit_scoring").join("in-flight-run");
        std::fs::create_dir_all(&in_flight).unwrap();
        std::fs::write(in_flight.join("artifact.json"), b"{}").unwrap();

        assert_eq!(registry.query_trials("credit_scoring").unwrap().len(), 1);
    }
}
