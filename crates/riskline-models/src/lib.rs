//! Riskline Models
//!
//! Binary classifiers for default prediction, all exposing the same
//! `predict` / `predict_proba` contract:
//! - Logistic regression (batch gradient descent)
//! - Random forest (bootstrapped variance-split trees)
//! - Gradient boosting (stagewise trees on log-loss gradients)
//!
//! Fitted models serialize to a single tagged artifact
//! (`TrainedClassifier`) so the registry can store and reload any family
//! through one representation.

pub mod artifact;
pub mod boosting;
pub mod error;
pub mod forest;
pub mod logistic;
pub mod tree;

pub use artifact::{ModelConfig, ModelFamily, TrainedClassifier};
pub use boosting::{BoostingConfig, GradientBoosting};
pub use error::{ModelError, ModelResult};
pub use forest::{ForestConfig, RandomForest};
pub use logistic::{LogisticConfig, LogisticRegression};
