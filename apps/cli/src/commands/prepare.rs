//! `riskline prepare`: dataset loading, splitting, scaler fitting.

use crate::config::CliConfig;
use anyhow::Context;
use colored::Colorize;
use riskline_core::{load_csv, stratified_split, FeatureSchema, ScalerState, SplitDataset};
use std::path::Path;

pub fn run(
    config: &CliConfig,
    data: &Path,
    label: Option<&str>,
    test_fraction: f64,
    seed: u64,
) -> anyhow::Result<()> {
    let schema = FeatureSchema::credit_default();
    let label_column = label.unwrap_or(&config.label_column);

    let dataset = load_csv(data, &schema, label_column)
        .with_context(|| format!("loading {}", data.display()))?;
    let (train, test) = stratified_split(&dataset, test_fraction, seed)?;

    // The scaler only ever sees the training partition.
    let scaler = ScalerState::fit(&schema, &train.records)?;
    let splits = SplitDataset::from_partitions(&scaler, &train, &test)?;

    if let Some(parent) = config.scaler_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if let Some(parent) = config.splits_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    scaler.save(&config.scaler_path)?;
    splits.save(&config.splits_path)?;

    println!(
        "{} {} rows split into {} train / {} test; scaler and splits written",
        "prepared:".green().bold(),
        dataset.len(),
        train.len(),
        test.len()
    );
    Ok(())
}
