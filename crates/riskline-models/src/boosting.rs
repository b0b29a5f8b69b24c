//! Gradient boosting for binary classification.
//!
//! Stagewise regression trees fitted to the negative log-loss gradient
//! (label minus current probability), combined through a sigmoid link.

use crate::error::{ModelError, ModelResult};
use crate::logistic::{check_matrix, sigmoid};
use crate::tree::{RegressionTree, TreeParams};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostingConfig {
    pub n_estimators: u32,
    pub learning_rate: f64,
    pub max_depth: u32,
}

impl Default for BoostingConfig {
    fn default() -> Self {
        Self { n_estimators: 100, learning_rate: 0.1, max_depth: 3 }
    }
}

impl BoostingConfig {
    pub fn validate(&self) -> ModelResult<()> {
        if self.n_estimators == 0 {
            return Err(ModelError::InvalidConfig("n_estimators must be >= 1".to_string()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ModelError::InvalidConfig("learning_rate must be > 0".to_string()));
        }
        if self.max_depth == 0 {
            return Err(ModelError::InvalidConfig("max_depth must be >= 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientBoosting {
    base_score: f64,
    learning_rate: f64,
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl GradientBoosting {
    pub fn fit(config: &BoostingConfig, x: &[Vec<f64>], y: &[u8]) -> ModelResult<Self> {
        config.validate()?;
        let n_features = check_matrix(x, y)?;

        let positives = y.iter().filter(|l| **l == 1).count();
        if positives == 0 || positives == y.len() {
            // The log-odds prior is undefined on a single-class sample.
            return Err(ModelError::TrainingData(
                "both classes must be present to fit gradient boosting".to_string(),
            ));
        }

        let p = positives as f64 / y.len() as f64;
        let base_score = (p / (1.0 - p)).ln();
        let mut scores = vec![base_score; x.len()];

        let sample: Vec<usize> = (0..x.len()).collect();
        let params =
            TreeParams { max_depth: config.max_depth, min_samples_split: 2, mtry: None };

        let mut trees = Vec::with_capacity(config.n_estimators as usize);
        for _ in 0..config.n_estimators {
            let residuals: Vec<f64> = scores
                .iter()
                .zip(y)
                .map(|(score, label)| f64::from(*label) - sigmoid(*score))
                .collect();

            let tree = RegressionTree::fit(x, &residuals, &sample, &params, None);
            for (score, row) in scores.iter_mut().zip(x) {
                *score += config.learning_rate * tree.predict(row);
            }
            trees.push(tree);
        }
        tracing::debug!(stages = trees.len(), "gradient boosting fitted");

        Ok(Self { base_score, learning_rate: config.learning_rate, trees, n_features })
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    /// Probability of the positive (default) class.
    pub fn predict_proba(&self, features: &[f64]) -> ModelResult<f64> {
        if features.len() != self.n_features {
            return Err(ModelError::DimensionMismatch {
                expected: self.n_features,
                found: features.len(),
            });
        }
        let raw: f64 = self.base_score
            + self.learning_rate * self.trees.iter().map(|t| t.predict(features)).sum::<f64>();
        Ok(sigmoid(raw))
    }

    pub fn predict(&self, features: &[f64]) -> ModelResult<u8> {
        Ok(u8::from(self.predict_proba(features)? >= 0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clustered_data() -> (Vec<Vec<f64>>, Vec<u8>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..25 {
            let jitter = f64::from(i % 5) * 0.08;
            x.push(vec![-1.5 + jitter]);
            y.push(0);
            x.push(vec![1.5 - jitter]);
            y.push(1);
        }
        (x, y)
    }

    #[test]
    fn test_boosting_separates_clusters() {
        let (x, y) = clustered_data();
        let config = BoostingConfig { n_estimators: 30, learning_rate: 0.2, max_depth: 2 };
        let model = GradientBoosting::fit(&config, &x, &y).unwrap();

        assert_eq!(model.predict(&[-1.5]).unwrap(), 0);
        assert_eq!(model.predict(&[1.5]).unwrap(), 1);
        assert!(model.predict_proba(&[1.5]).unwrap() > 0.8);
    }

    #[test]
    fn test_single_class_sample_is_rejected() {
        let x = vec![vec![1.0], vec![2.0]];
        let y = vec![1, 1];
        assert!(matches!(
            GradientBoosting::fit(&BoostingConfig::default(), &x, &y),
            Err(ModelError::TrainingData(_))
        ));
    }

    #[test]
    fn test_more_stages_fit_training_data_tighter() {
        let (x, y) = clustered_data();
        let few = GradientBoosting::fit(
            &BoostingConfig { n_estimators: 1, learning_rate: 0.1, max_depth: 2 },
            &x,
            &y,
        )
        .unwrap();
        let many = GradientBoosting::fit(
            &BoostingConfig { n_estimators: 50, learning_rate: 0.1, max_depth: 2 },
            &x,
            &y,
        )
        .unwrap();

        let p_few = few.predict_proba(&[1.5]).unwrap();
        let p_many = many.predict_proba(&[1.5]).unwrap();
        assert!(p_many > p_few);
    }
}
