//! Random forest over bootstrapped regression trees.

use crate::error::{ModelError, ModelResult};
use crate::logistic::check_matrix;
use crate::tree::{RegressionTree, TreeParams};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_estimators: u32,
    pub max_depth: u32,
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self { n_estimators: 100, max_depth: 6, seed: 42 }
    }
}

impl ForestConfig {
    pub fn validate(&self) -> ModelResult<()> {
        if self.n_estimators == 0 {
            return Err(ModelError::InvalidConfig("n_estimators must be >= 1".to_string()));
        }
        if self.max_depth == 0 {
            return Err(ModelError::InvalidConfig("max_depth must be >= 1".to_string()));
        }
        Ok(())
    }
}

/// Fitted forest. Each tree's leaf values are class fractions of its
/// bootstrap sample, so averaging tree outputs yields the default
/// probability directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForest {
    pub fn fit(config: &ForestConfig, x: &[Vec<f64>], y: &[u8]) -> ModelResult<Self> {
        config.validate()?;
        let n_features = check_matrix(x, y)?;
        let targets: Vec<f64> = y.iter().map(|l| f64::from(*l)).collect();

        let mut rng = StdRng::seed_from_u64(config.seed);
        // sqrt(d) features per split, the usual classification default.
        let mtry = ((n_features as f64).sqrt().ceil() as usize).clamp(1, n_features);
        let params = TreeParams { max_depth: config.max_depth, min_samples_split: 2, mtry: Some(mtry) };

        let mut trees = Vec::with_capacity(config.n_estimators as usize);
        for _ in 0..config.n_estimators {
            let sample: Vec<usize> =
                (0..x.len()).map(|_| rng.gen_range(0..x.len())).collect();
            trees.push(RegressionTree::fit(x, &targets, &sample, &params, Some(&mut rng)));
        }
        tracing::debug!(trees = trees.len(), mtry, "random forest fitted");

        Ok(Self { trees, n_features })
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Probability of the positive (default) class: mean of tree outputs.
    pub fn predict_proba(&self, features: &[f64]) -> ModelResult<f64> {
        if features.len() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                found: features.len(),
            });
        }
        let sum: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        Ok((sum / self.trees.len() as f64).clamp(0.0, 1.0))
    }

    pub fn predict(&self, features: &[f64]) -> ModelResult<u8> {
        Ok(u8::from(self.predict_proba(features)? >= 0.5))
    }
}
