//! `riskline predict`: score one applicant from a JSON record.

use crate::config::CliConfig;
use anyhow::{anyhow, Context};
use colored::Colorize;
use riskline_core::FeatureSchema;
use riskline_registry::RunRegistry;
use riskline_serving::{DefaultLabel, PredictionLog, RiskTier, ServingContext};
use std::path::Path;

pub fn run(config: &CliConfig, input: &Path, history: Option<&Path>) -> anyhow::Result<()> {
    let values = read_input(input)?;

    let registry = RunRegistry::new(&config.registry_root);
    let context = ServingContext::initialize(
        FeatureSchema::credit_default(),
        &registry,
        &config.experiment,
        &config.scaler_path,
    )?;

    let result = context.predict(&values)?;

    let verdict = match result.label {
        DefaultLabel::WillRepay => "applicant is predicted to repay".green().bold(),
        DefaultLabel::WillDefault => "applicant is predicted to default".red().bold(),
    };
    let tier = match result.tier {
        RiskTier::Low => "low".green(),
        RiskTier::Medium => "medium".yellow(),
        RiskTier::High => "high".red(),
    };
    println!("{verdict}");
    println!("default probability: {:.4}", result.probability);
    println!("risk tier: {tier}");
    println!(
        "model: run {} ({})",
        context.champion().run_id,
        context.champion().run_name
    );

    if let Some(history_path) = history {
        let mut log = PredictionLog::new();
        log.record(&values, result);
        log.append_csv(context.schema(), history_path)?;
        println!("history appended to {}", history_path.display());
    }
    Ok(())
}

/// Read a flat JSON object of `field: number` pairs.
fn read_input(path: &Path) -> anyhow::Result<Vec<(String, f64)>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("parsing {}", path.display()))?;

    let object = json
        .as_object()
        .ok_or_else(|| anyhow!("input must be a JSON object of field: number pairs"))?;

    let mut values = Vec::with_capacity(object.len());
    for (name, value) in object {
        let number = value
            .as_f64()
            .ok_or_else(|| anyhow!("field {name} must be a number, got {value}"))?;
        values.push((name.clone(), number));
    }
    Ok(values)
}
