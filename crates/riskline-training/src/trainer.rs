//! Fit, evaluate, and record one training trial.

use crate::error::{TrainError, TrainResult};
use riskline_core::metrics::{accuracy, ConfusionMatrix};
use riskline_core::SplitDataset;
use riskline_models::ModelConfig;
use riskline_registry::{RunRegistry, TrialRecord, ACCURACY_METRIC};
use std::collections::BTreeMap;

/// Outcome of one trial: the recorded registry entry plus the full
/// confusion matrix (the registry keeps only scalar metrics).
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub trial: TrialRecord,
    pub confusion: ConfusionMatrix,
}

/// Train one classifier family and record the trial under `experiment`.
///
/// Invocations for different families are independent and
/// order-insensitive; each produces exactly one trial. Failures are fatal
/// for the invocation and never retried.
pub fn train_trial(
    registry: &RunRegistry,
    experiment: &str,
    config: &ModelConfig,
    splits: &SplitDataset,
) -> TrainResult<TrainReport> {
    validate_splits(splits)?;
    config.validate()?;
    registry.create_experiment(experiment)?;

    let run_name = config.family().to_string();
    tracing::info!(experiment, family = %run_name, rows = splits.x_train.len(), "training trial");

    let model = config.fit(&splits.x_train, &splits.y_train)?;

    let mut predictions = Vec::with_capacity(splits.x_test.len());
    for row in &splits.x_test {
        predictions.push(model.predict(row)?);
    }
    let test_accuracy = accuracy(&splits.y_test, &predictions)?;
    let confusion = ConfusionMatrix::from_labels(&splits.y_test, &predictions)?;

    let metrics = BTreeMap::from([
        (ACCURACY_METRIC.to_string(), test_accuracy),
        ("tn".to_string(), confusion.true_negatives as f64),
        ("fp".to_string(), confusion.false_positives as f64),
        ("fn".to_string(), confusion.false_negatives as f64),
        ("tp".to_string(), confusion.true_positives as f64),
    ]);

    let trial = registry.log_trial(experiment, &run_name, config.params(), metrics, &model)?;
    tracing::info!(run = %trial.run_id, accuracy = test_accuracy, "trial recorded");

    Ok(TrainReport { trial, confusion })
}

fn validate_splits(splits: &SplitDataset) -> TrainResult<()> {
    if splits.x_train.is_empty() || splits.x_test.is_empty() {
        return Err(TrainError::InvalidData("train and test sets must be non-empty".to_string()));
    }
    if splits.x_train.len() != splits.y_train.len() || splits.x_test.len() != splits.y_test.len() {
        return Err(TrainError::InvalidData("features and labels differ in length".to_string()));
    }
    if splits.y_train.iter().chain(&splits.y_test).any(|label| *label > 1) {
        return Err(TrainError::InvalidData("labels must be binary 0/1".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskline_models::ModelFamily;
    use riskline_registry::select_best;
    use tempfile::TempDir;

    fn splits() -> SplitDataset {
        let mut x_train = Vec::new();
        let mut y_train = Vec::new();
        for i in 0..20 {
            let jitter = f64::from(i % 5) * 0.1;
            x_train.push(vec![-1.0 - jitter, jitter]);
            y_train.push(0);
            x_train.push(vec![1.0 + jitter, -jitter]);
            y_train.push(1);
        }
        let x_test = vec![vec![-1.2, 0.1], vec![1.3, -0.2], vec![-0.9, 0.3], vec![1.1, 0.0]];
        let y_test = vec![0, 1, 0, 1];
        SplitDataset { x_train, y_train, x_test, y_test }
    }

    #[test]
    fn test_each_family_records_one_trial() {
        let temp = TempDir::new().unwrap();
        let registry = RunRegistry::new(temp.path());
        let splits = splits();

        for family in
            [ModelFamily::Logistic, ModelFamily::RandomForest, ModelFamily::GradientBoosting]
        {
            let config = ModelConfig::defaults_for(family);
            let report = train_trial(&registry, "credit_scoring", &config, &splits).unwrap();
            assert_eq!(report.trial.run_name, family.to_string());
            assert!(report.trial.accuracy().is_some());
            assert_eq!(report.confusion.total(), 4);
        }

        let trials = registry.query_trials("credit_scoring").unwrap();
        assert_eq!(trials.len(), 3);
        assert!(select_best(&registry, "credit_scoring").is_ok());
    }

    #[test]
    fn test_separable_data_scores_perfectly() {
        let temp = TempDir::new().unwrap();
        let registry = RunRegistry::new(temp.path());

        let config = ModelConfig::defaults_for(ModelFamily::Logistic);
        let report = train_trial(&registry, "credit_scoring", &config, &splits()).unwrap();
        assert_eq!(report.trial.accuracy(), Some(1.0));
        assert_eq!(report.confusion.false_positives, 0);
        assert_eq!(report.confusion.false_negatives, 0);
    }

    #[test]
    fn test_empty_training_data_is_fatal() {
        let temp = TempDir::new().unwrap();
        let registry = RunRegistry::new(temp.path());

        let empty = SplitDataset {
            x_train: vec![],
            y_train: vec![],
            x_test: vec![],
            y_test: vec![],
        };
        let config = ModelConfig::defaults_for(ModelFamily::Logistic);
        assert!(matches!(
            train_trial(&registry, "credit_scoring", &config, &empty),
            Err(TrainError::InvalidData(_))
        ));
    }

    #[test]
    fn test_non_binary_labels_are_fatal() {
        let temp = TempDir::new().unwrap();
        let registry = RunRegistry::new(temp.path());

        let mut bad = splits();
        bad.y_train[0] = 3;
        let config = ModelConfig::defaults_for(ModelFamily::Logistic);
        assert!(matches!(
            train_trial(&registry, "credit_scoring", &config, &bad),
            Err(TrainError::InvalidData(_))
        ));
    }
}
