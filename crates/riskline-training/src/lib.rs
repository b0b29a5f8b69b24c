//! Riskline Training
//!
//! One entry point, `train_trial`: fit a classifier family on preprocessed
//! training data, score it on the held-out test set, and record the whole
//! trial (params, metrics, artifact) in the run registry.

pub mod error;
pub mod trainer;

pub use error::{TrainError, TrainResult};
pub use trainer::{train_trial, TrainReport};
