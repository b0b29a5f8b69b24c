use thiserror::Error;

pub type TrainResult<T> = std::result::Result<T, TrainError>;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("invalid training data: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Core(#[from] riskline_core::CoreError),

    #[error(transparent)]
    Model(#[from] riskline_models::ModelError),

    #[error(transparent)]
    Registry(#[from] riskline_registry::RegistryError),
}
