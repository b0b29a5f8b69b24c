use thiserror::Error;

pub type ModelResult<T> = std::result::Result<T, ModelError>;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("feature vector has {found} values, model expects {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("invalid hyperparameter: {0}")]
    InvalidConfig(String),

    #[error("training data error: {0}")]
    TrainingData(String),
}
