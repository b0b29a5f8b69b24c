//! Trial records: one immutable entry per training invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use uuid::Uuid;

/// Metric key every trial must carry; champion selection ranks by it.
pub const ACCURACY_METRIC: &str = "accuracy";

/// Identifier for a recorded run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub String);

impl RunId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Reference to a stored classifier artifact.
///
/// `path` is relative to the registry root, so a registry directory can be
/// moved wholesale without invalidating its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRef {
    pub path: PathBuf,
    pub sha256: String,
}

/// One training invocation's recorded parameters, metrics, and artifact.
/// Immutable after creation; lives in the registry indefinitely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub experiment: String,
    pub run_id: RunId,
    /// Human-readable tag, e.g. the model family.
    pub run_name: String,
    pub created_at: DateTime<Utc>,
    pub params: BTreeMap<String, String>,
    pub metrics: BTreeMap<String, f64>,
    pub artifact: ArtifactRef,
}

impl TrialRecord {
    /// The trial's accuracy metric, if recorded.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        self.metrics.get(ACCURACY_METRIC).copied()
    }
}
