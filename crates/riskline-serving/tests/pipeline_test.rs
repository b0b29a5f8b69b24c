//! End-to-end pipeline: preprocess, train, select, serve.

use riskline_core::{
    FeatureSchema, FieldDomain, FieldSpec, Record, ScalerState, SplitDataset,
};
use riskline_models::{ModelConfig, ModelFamily};
use riskline_registry::RunRegistry;
use riskline_serving::{PredictionLog, RiskTier, ServingContext, ServingError};
use riskline_training::train_trial;
use std::collections::BTreeMap;
use tempfile::TempDir;

const EXPERIMENT: &str = "credit_scoring";

fn schema() -> FeatureSchema {
    FeatureSchema::new(vec![
        FieldSpec::new("LIMIT_BAL", FieldDomain::NonNegative),
        FieldSpec::new("AGE", FieldDomain::IntRange { min: 18, max: 100 }),
        FieldSpec::new("PAY_0", FieldDomain::IntRange { min: -1, max: 8 }),
    ])
}

fn record(schema: &FeatureSchema, limit: f64, age: f64, pay: f64) -> Record {
    Record::from_named_values(
        schema,
        &[
            ("LIMIT_BAL".to_string(), limit),
            ("AGE".to_string(), age),
            ("PAY_0".to_string(), pay),
        ],
    )
    .unwrap()
}

/// Applicants with clean repayment history repay; delinquent ones default.
fn labeled_records(schema: &FeatureSchema) -> (Vec<Record>, Vec<u8>) {
    let mut records = Vec::new();
    let mut labels = Vec::new();
    for i in 0..30 {
        let age = f64::from(25 + (i % 30));
        records.push(record(schema, 80_000.0 + f64::from(i) * 1_000.0, age, 0.0));
        labels.push(0);
        records.push(record(schema, 20_000.0 + f64::from(i) * 500.0, age, 6.0));
        labels.push(1);
    }
    (records, labels)
}

struct Pipeline {
    _temp: TempDir,
    registry: RunRegistry,
    scaler_path: std::path::PathBuf,
    splits: SplitDataset,
}

fn build_pipeline() -> Pipeline {
    let temp = TempDir::new().unwrap();
    let schema = schema();
    let (records, labels) = labeled_records(&schema);

    // Fit the scaler on the first 40 rows, hold out the rest.
    let (train_records, test_records) = records.split_at(40);
    let (train_labels, test_labels) = labels.split_at(40);

    let scaler = ScalerState::fit(&schema, train_records).unwrap();
    let scaler_path = temp.path().join("scaler.json");
    scaler.save(&scaler_path).unwrap();

    let splits = SplitDataset {
        x_train: scaler.transform_matrix(train_records).unwrap(),
        y_train: train_labels.to_vec(),
        x_test: scaler.transform_matrix(test_records).unwrap(),
        y_test: test_labels.to_vec(),
    };

    let registry = RunRegistry::new(temp.path().join("runs"));
    Pipeline { _temp: temp, registry, scaler_path, splits }
}

fn valid_input() -> Vec<(String, f64)> {
    vec![
        ("LIMIT_BAL".to_string(), 30_000.0),
        ("AGE".to_string(), 40.0),
        ("PAY_0".to_string(), 7.0),
    ]
}

#[test]
fn test_full_pipeline_scores_an_applicant() {
    let pipeline = build_pipeline();
    for family in [ModelFamily::Logistic, ModelFamily::GradientBoosting] {
        let config = ModelConfig::defaults_for(family);
        train_trial(&pipeline.registry, EXPERIMENT, &config, &pipeline.splits).unwrap();
    }

    let context = ServingContext::initialize(
        schema(),
        &pipeline.registry,
        EXPERIMENT,
        &pipeline.scaler_path,
    )
    .unwrap();

    // A delinquent low-limit applicant should look risky.
    let result = context.predict(&valid_input()).unwrap();
    assert!((0.0..=1.0).contains(&result.probability));
    assert_eq!(result.tier, RiskTier::from_probability(result.probability));

    let mut log = PredictionLog::new();
    log.record(&valid_input(), result);
    let csv = log.to_csv(context.schema()).unwrap();
    assert_eq!(csv.lines().count(), 2);
}

#[test]
fn test_predict_with_exact_fields_never_mismatches() {
    let pipeline = build_pipeline();
    let config = ModelConfig::defaults_for(ModelFamily::Logistic);
    train_trial(&pipeline.registry, EXPERIMENT, &config, &pipeline.splits).unwrap();

    let context = ServingContext::initialize(
        schema(),
        &pipeline.registry,
        EXPERIMENT,
        &pipeline.scaler_path,
    )
    .unwrap();

    assert!(context.predict(&valid_input()).is_ok());
}

#[test]
fn test_predict_rejects_missing_and_extra_fields() {
    let pipeline = build_pipeline();
    let config = ModelConfig::defaults_for(ModelFamily::Logistic);
    train_trial(&pipeline.registry, EXPERIMENT, &config, &pipeline.splits).unwrap();

    let context = ServingContext::initialize(
        schema(),
        &pipeline.registry,
        EXPERIMENT,
        &pipeline.scaler_path,
    )
    .unwrap();

    let mut missing = valid_input();
    missing.pop();
    assert!(matches!(context.predict(&missing), Err(ServingError::Schema(_))));

    let mut extra = valid_input();
    extra.push(("BILL_AMT6".to_string(), 100.0));
    assert!(matches!(context.predict(&extra), Err(ServingError::Schema(_))));
}

#[test]
fn test_reinitialization_picks_up_new_champion() {
    let pipeline = build_pipeline();
    let config = ModelConfig::defaults_for(ModelFamily::Logistic);
    let model = config.fit(&pipeline.splits.x_train, &pipeline.splits.y_train).unwrap();
    pipeline.registry.create_experiment(EXPERIMENT).unwrap();

    let first = pipeline
        .registry
        .log_trial(
            EXPERIMENT,
            "logistic_regression",
            config.params(),
            BTreeMap::from([("accuracy".to_string(), 0.81)]),
            &model,
        )
        .unwrap();

    let context = ServingContext::initialize(
        schema(),
        &pipeline.registry,
        EXPERIMENT,
        &pipeline.scaler_path,
    )
    .unwrap();
    assert_eq!(context.champion().run_id, first.run_id);

    // Append a trial that beats the current champion outright.
    let better = pipeline
        .registry
        .log_trial(
            EXPERIMENT,
            "logistic_regression",
            config.params(),
            BTreeMap::from([("accuracy".to_string(), 0.95)]),
            &model,
        )
        .unwrap();

    // The running context is pinned to its champion ...
    assert_eq!(context.champion().run_id, first.run_id);

    // ... and a fresh initialization resolves the new one.
    let refreshed = ServingContext::initialize(
        schema(),
        &pipeline.registry,
        EXPERIMENT,
        &pipeline.scaler_path,
    )
    .unwrap();
    assert_eq!(refreshed.champion().run_id, better.run_id);
}

#[test]
fn test_initialize_fails_without_experiment() {
    let pipeline = build_pipeline();
    let result = ServingContext::initialize(
        schema(),
        &pipeline.registry,
        EXPERIMENT,
        &pipeline.scaler_path,
    );
    assert!(matches!(result, Err(ServingError::Registry(_))));
}

#[test]
fn test_initialize_rejects_foreign_scaler_state() {
    let pipeline = build_pipeline();
    let config = ModelConfig::defaults_for(ModelFamily::Logistic);
    train_trial(&pipeline.registry, EXPERIMENT, &config, &pipeline.splits).unwrap();

    let narrow = FeatureSchema::new(vec![FieldSpec::new("LIMIT_BAL", FieldDomain::NonNegative)]);
    let result = ServingContext::initialize(
        narrow,
        &pipeline.registry,
        EXPERIMENT,
        &pipeline.scaler_path,
    );
    assert!(result.is_err());
}
