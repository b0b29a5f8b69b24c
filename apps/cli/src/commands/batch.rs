//! `riskline batch`: score a CSV of applicants with the champion model.

use crate::config::CliConfig;
use anyhow::Context;
use colored::Colorize;
use riskline_core::{load_records_csv, FeatureSchema};
use riskline_registry::RunRegistry;
use riskline_serving::{PredictionLog, ServingContext};
use std::path::Path;

pub fn run(config: &CliConfig, input: &Path, output: &Path) -> anyhow::Result<()> {
    let schema = FeatureSchema::credit_default();
    let records = load_records_csv(input, &schema)
        .with_context(|| format!("loading {}", input.display()))?;

    let registry = RunRegistry::new(&config.registry_root);
    let context = ServingContext::initialize(
        schema,
        &registry,
        &config.experiment,
        &config.scaler_path,
    )?;

    let mut log = PredictionLog::new();
    for (row, record) in records.iter().enumerate() {
        let result = context
            .predict_record(record)
            .with_context(|| format!("scoring row {}", row + 1))?;
        let inputs: Vec<(String, f64)> = context
            .schema()
            .field_names()
            .map(str::to_string)
            .zip(record.values().iter().copied())
            .collect();
        log.record(&inputs, result);
    }

    log.export_csv(context.schema(), output)?;
    println!(
        "{} {} applicants scored with run {} ({}); written to {}",
        "batch:".green().bold(),
        log.len(),
        context.champion().run_id,
        context.champion().run_name,
        output.display()
    );
    Ok(())
}
