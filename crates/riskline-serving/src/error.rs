use thiserror::Error;

pub type ServingResult<T> = std::result::Result<T, ServingError>;

#[derive(Debug, Error)]
pub enum ServingError {
    #[error(transparent)]
    Schema(#[from] riskline_core::SchemaMismatch),

    /// The champion classifier and the feature schema disagree on width.
    /// Fatal at initialization; predictions never start.
    #[error("champion classifier expects {found} features, schema declares {expected}")]
    FeatureArity { expected: usize, found: usize },

    #[error(transparent)]
    Core(#[from] riskline_core::CoreError),

    #[error(transparent)]
    Registry(#[from] riskline_registry::RegistryError),

    #[error(transparent)]
    Model(#[from] riskline_models::ModelError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
