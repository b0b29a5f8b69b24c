//! Logistic regression fitted by batch gradient descent.

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// Convergence tolerance on the gradient norm.
const GRADIENT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticConfig {
    pub max_iter: u32,
    pub learning_rate: f64,
}

impl Default for LogisticConfig {
    fn default() -> Self {
        Self { max_iter: 1000, learning_rate: 0.1 }
    }
}

impl LogisticConfig {
    pub fn validate(&self) -> ModelResult<()> {
        if self.max_iter == 0 {
            return Err(ModelError::InvalidConfig("max_iter must be >= 1".to_string()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ModelError::InvalidConfig("learning_rate must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Fitted logistic model: one weight per feature plus an intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    intercept: f64,
}

pub(crate) fn sigmoid(z: f64) -> f64 {
    // Clamp the logit so exp() cannot overflow to inf and poison the output.
    1.0 / (1.0 + (-z.clamp(-500.0, 500.0)).exp())
}

impl LogisticRegression {
    /// Fit on standardized features and binary labels.
    ///
    /// Full-batch gradient descent on the mean log-loss, starting from zero
    /// weights; stops early once the gradient norm drops below tolerance.
    pub fn fit(config: &LogisticConfig, x: &[Vec<f64>], y: &[u8]) -> ModelResult<Self> {
        config.validate()?;
        let n_features = check_matrix(x, y)?;

        let n = x.len() as f64;
        let mut weights = vec![0.0; n_features];
        let mut intercept = 0.0;

        for iteration in 0..config.max_iter {
            let mut grad_w = vec![0.0; n_features];
            let mut grad_b = 0.0;
            for (row, label) in x.iter().zip(y) {
                let p = sigmoid(dot(&weights, row) + intercept);
                let residual = p - f64::from(*label);
                for (g, v) in grad_w.iter_mut().zip(row) {
                    *g += residual * v;
                }
                grad_b += residual;
            }

            grad_b /= n;
            let mut norm = grad_b * grad_b;
            for g in &mut grad_w {
                *g /= n;
                norm += *g * *g;
            }

            for (w, g) in weights.iter_mut().zip(&grad_w) {
                *w -= config.learning_rate * g;
            }
            intercept -= config.learning_rate * grad_b;

            if norm.sqrt() < GRADIENT_TOLERANCE {
                tracing::debug!(iteration, "logistic regression converged early");
                break;
            }
        }

        Ok(Self { weights, intercept })
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.weights.len()
    }

    /// Probability of the positive (default) class.
    pub fn predict_proba(&self, features: &[f64]) -> ModelResult<f64> {
        if features.len() != self.weights.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.weights.len(),
                found: features.len(),
            });
        }
        Ok(sigmoid(dot(&self.weights, features) + self.intercept))
    }

    pub fn predict(&self, features: &[f64]) -> ModelResult<u8> {
        Ok(u8::from(self.predict_proba(features)? >= 0.5))
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Shared training-matrix validation: non-empty, rectangular, labels
/// aligned and binary.
pub(crate) fn check_matrix(x: &[Vec<f64>], y: &[u8]) -> ModelResult<usize> {
    if x.is_empty() {
        return Err(ModelError::TrainingData("training set is empty".to_string()));
    }
    if x.len() != y.len() {
        return Err(ModelError::TrainingData(format!(
            "{} feature rows but {} labels",
            x.len(),
            y.len()
        )));
    }
    let n_features = x[0].len();
    if n_features == 0 {
        return Err(ModelError::TrainingData("rows have zero features".to_string()));
    }
    for row in x {
        if row.len() != n_features {
            return Err(ModelError::DimensionMismatch { expected: n_features, found: row.len() });
        }
    }
    if y.iter().any(|label| *label > 1) {
        return Err(ModelError::TrainingData("labels must be binary 0/1".to_string()));
    }
    Ok(n_features)
}
