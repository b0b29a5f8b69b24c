//! Riskline Registry
//!
//! File-backed, append-only catalogue of training trials grouped by
//! experiment name:
//! - Recording trials (params, metrics, artifact + digest)
//! - Querying an experiment's trials
//! - Reloading trained artifacts with digest verification
//! - Selecting the champion trial deterministically

pub mod champion;
pub mod error;
pub mod layout;
pub mod store;
pub mod trial;

pub use champion::select_best;
pub use error::{RegistryError, RegistryResult};
pub use layout::RegistryLayout;
pub use store::{ExperimentMeta, RunRegistry};
pub use trial::{ArtifactRef, RunId, TrialRecord, ACCURACY_METRIC};
