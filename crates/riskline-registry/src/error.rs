use thiserror::Error;

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("experiment not found: {0}")]
    ExperimentNotFound(String),

    #[error("experiment {0} has no trials")]
    EmptyExperiment(String),

    #[error("trial {run_id} is missing the {metric} metric")]
    MissingMetric { run_id: String, metric: String },

    /// The referenced classifier cannot be retrieved or deserialized.
    /// No fallback champion is attempted.
    #[error("failed to load artifact for run {run_id}: {reason}")]
    ArtifactLoadFailure { run_id: String, reason: String },

    #[error("trial record error: {0}")]
    Trial(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
