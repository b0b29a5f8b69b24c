//! Uniform fitted-model representation.
//!
//! `TrainedClassifier` is the single serializable artifact the registry
//! stores and the serving layer reloads; `ModelConfig` is the matching
//! pre-fit side: one variant per family, carrying that family's
//! hyperparameters.

use crate::boosting::{BoostingConfig, GradientBoosting};
use crate::error::ModelResult;
use crate::forest::{ForestConfig, RandomForest};
use crate::logistic::{LogisticConfig, LogisticRegression};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Supported model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    Logistic,
    RandomForest,
    GradientBoosting,
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModelFamily::Logistic => "logistic_regression",
            ModelFamily::RandomForest => "random_forest",
            ModelFamily::GradientBoosting => "gradient_boosting",
        };
        f.write_str(name)
    }
}

impl FromStr for ModelFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "logistic" | "logistic_regression" | "logistic-regression" => Ok(Self::Logistic),
            "random_forest" | "random-forest" => Ok(Self::RandomForest),
            "gradient_boosting" | "gradient-boosting" => Ok(Self::GradientBoosting),
            other => Err(format!("unknown model family: {other}")),
        }
    }
}

/// Hyperparameters for one training invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum ModelConfig {
    Logistic(LogisticConfig),
    RandomForest(ForestConfig),
    GradientBoosting(BoostingConfig),
}

impl ModelConfig {
    /// Family defaults mirroring the reference training scripts.
    #[must_use]
    pub fn defaults_for(family: ModelFamily) -> Self {
        match family {
            ModelFamily::Logistic => Self::Logistic(LogisticConfig::default()),
            ModelFamily::RandomForest => Self::RandomForest(ForestConfig::default()),
            ModelFamily::GradientBoosting => Self::GradientBoosting(BoostingConfig::default()),
        }
    }

    #[must_use]
    pub fn family(&self) -> ModelFamily {
        match self {
            Self::Logistic(_) => ModelFamily::Logistic,
            Self::RandomForest(_) => ModelFamily::RandomForest,
            Self::GradientBoosting(_) => ModelFamily::GradientBoosting,
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        match self {
            Self::Logistic(c) => c.validate(),
            Self::RandomForest(c) => c.validate(),
            Self::GradientBoosting(c) => c.validate(),
        }
    }

    /// Hyperparameters as an ordered string map for trial logging.
    #[must_use]
    pub fn params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("model_type".to_string(), self.family().to_string());
        match self {
            Self::Logistic(c) => {
                params.insert("max_iter".to_string(), c.max_iter.to_string());
                params.insert("learning_rate".to_string(), c.learning_rate.to_string());
            }
            Self::RandomForest(c) => {
                params.insert("n_estimators".to_string(), c.n_estimators.to_string());
                params.insert("max_depth".to_string(), c.max_depth.to_string());
                params.insert("seed".to_string(), c.seed.to_string());
            }
            Self::GradientBoosting(c) => {
                params.insert("n_estimators".to_string(), c.n_estimators.to_string());
                params.insert("learning_rate".to_string(), c.learning_rate.to_string());
                params.insert("max_depth".to_string(), c.max_depth.to_string());
            }
        }
        params
    }

    /// Fit this configuration on standardized features and binary labels.
    pub fn fit(&self, x: &[Vec<f64>], y: &[u8]) -> ModelResult<TrainedClassifier> {
        match self {
            Self::Logistic(c) => {
                Ok(TrainedClassifier::Logistic(LogisticRegression::fit(c, x, y)?))
            }
            Self::RandomForest(c) => {
                Ok(TrainedClassifier::RandomForest(RandomForest::fit(c, x, y)?))
            }
            Self::GradientBoosting(c) => {
                Ok(TrainedClassifier::GradientBoosting(GradientBoosting::fit(c, x, y)?))
            }
        }
    }
}

/// A fitted classifier of any family, serializable as one tagged artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum TrainedClassifier {
    Logistic(LogisticRegression),
    RandomForest(RandomForest),
    GradientBoosting(GradientBoosting),
}

impl TrainedClassifier {
    #[must_use]
    pub fn family(&self) -> ModelFamily {
        match self {
            Self::Logistic(_) => ModelFamily::Logistic,
            Self::RandomForest(_) => ModelFamily::RandomForest,
            Self::GradientBoosting(_) => ModelFamily::GradientBoosting,
        }
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        match self {
            Self::Logistic(m) => m.n_features(),
            Self::RandomForest(m) => m.n_features(),
            Self::GradientBoosting(m) => m.n_features(),
        }
    }

    /// Predicted label: 1 = will default, 0 = will not.
    pub fn predict(&self, features: &[f64]) -> ModelResult<u8> {
        match self {
            Self::Logistic(m) => m.predict(features),
            Self::RandomForest(m) => m.predict(features),
            Self::GradientBoosting(m) => m.predict(features),
        }
    }

    /// Probability of the positive (default) class, in [0, 1].
    pub fn predict_proba(&self, features: &[f64]) -> ModelResult<f64> {
        match self {
            Self::Logistic(m) => m.predict_proba(features),
            Self::RandomForest(m) => m.predict_proba(features),
            Self::GradientBoosting(m) => m.predict_proba(features),
        }
    }
}
