//! Riskline Core
//!
//! Shared primitives for the credit-default scoring pipeline:
//! - Declaring the fixed feature schema (`FeatureSchema`)
//! - Building validated records (`Record`)
//! - Loading and splitting labeled datasets
//! - Fitting and applying the standardizing preprocessor (`ScalerState`)
//! - Computing evaluation metrics

pub mod dataset;
pub mod error;
pub mod metrics;
pub mod preprocess;
pub mod record;
pub mod schema;

pub use dataset::{
    load_csv, load_records_csv, stratified_split, LabeledDataset, SplitDataset,
    DEFAULT_LABEL_COLUMN,
};
pub use error::{CoreError, CoreResult};
pub use metrics::{accuracy, ConfusionMatrix};
pub use preprocess::{ScalerState, STD_EPSILON};
pub use record::Record;
pub use schema::{FeatureSchema, FieldDomain, FieldSpec, SchemaMismatch};
