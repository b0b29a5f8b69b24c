//! Evaluation metrics for binary classifiers.

use crate::error::{CoreError, CoreResult};

/// Fraction of exact label matches.
pub fn accuracy(truth: &[u8], predictions: &[u8]) -> CoreResult<f64> {
    if truth.len() != predictions.len() {
        return Err(CoreError::Dataset(format!(
            "label vectors differ in length: {} vs {}",
            truth.len(),
            predictions.len()
        )));
    }
    if truth.is_empty() {
        return Err(CoreError::Dataset("cannot score an empty label vector".to_string()));
    }
    let hits = truth.iter().zip(predictions).filter(|(t, p)| t == p).count();
    Ok(hits as f64 / truth.len() as f64)
}

/// 2x2 confusion matrix with the default class (label 1) as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfusionMatrix {
    pub true_negatives: u64,
    pub false_positives: u64,
    pub false_negatives: u64,
    pub true_positives: u64,
}

impl ConfusionMatrix {
    pub fn from_labels(truth: &[u8], predictions: &[u8]) -> CoreResult<Self> {
        if truth.len() != predictions.len() {
            return Err(CoreError::Dataset(format!(
                "label vectors differ in length: {} vs {}",
                truth.len(),
                predictions.len()
            )));
        }
        let mut matrix = Self::default();
        for (t, p) in truth.iter().zip(predictions) {
            match (*t, *p) {
                (0, 0) => matrix.true_negatives += 1,
                (0, _) => matrix.false_positives += 1,
                (_, 0) => matrix.false_negatives += 1,
                _ => matrix.true_positives += 1,
            }
        }
        Ok(matrix)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.true_negatives + self.false_positives + self.false_negatives + self.true_positives
    }

    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.true_negatives + self.true_positives) as f64 / total as f64
    }
}

impl std::fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[[{} {}]\n [{} {}]]",
            self.true_negatives, self.false_positives, self.false_negatives, self.true_positives
        )
    }
}
