use crate::schema::SchemaMismatch;
use thiserror::Error;

pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Schema(#[from] SchemaMismatch),

    /// Fitted scaler state does not line up with the feature schema.
    /// This is a configuration error, not a per-request failure.
    #[error("scaler state carries {found} fields but the schema declares {expected}")]
    StateDimension { expected: usize, found: usize },

    #[error("dataset error: {0}")]
    Dataset(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
