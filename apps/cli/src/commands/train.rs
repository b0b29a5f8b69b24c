//! `riskline train`: fit one family, record one trial.

use crate::config::CliConfig;
use anyhow::{anyhow, Context};
use colored::Colorize;
use riskline_core::SplitDataset;
use riskline_models::{ModelConfig, ModelFamily};
use riskline_registry::RunRegistry;
use riskline_training::train_trial;

/// Optional hyperparameter overrides from the command line; flags that do
/// not apply to the chosen family are rejected rather than ignored.
#[derive(Debug, Default)]
pub struct Overrides {
    pub n_estimators: Option<u32>,
    pub max_depth: Option<u32>,
    pub learning_rate: Option<f64>,
    pub max_iter: Option<u32>,
}

pub fn run(config: &CliConfig, family: &str, overrides: Overrides) -> anyhow::Result<()> {
    let family: ModelFamily = family.parse().map_err(|e: String| anyhow!(e))?;
    let model_config = apply_overrides(ModelConfig::defaults_for(family), overrides)?;

    let splits = SplitDataset::load(&config.splits_path)
        .with_context(|| format!("loading splits from {}", config.splits_path.display()))?;

    let registry = RunRegistry::new(&config.registry_root);
    let report = train_trial(&registry, &config.experiment, &model_config, &splits)?;

    println!(
        "{} run {} ({}) accuracy {:.4}",
        "trained:".green().bold(),
        report.trial.run_id,
        report.trial.run_name,
        report.trial.accuracy().unwrap_or_default()
    );
    println!("confusion matrix:\n{}", report.confusion);
    Ok(())
}

fn apply_overrides(config: ModelConfig, overrides: Overrides) -> anyhow::Result<ModelConfig> {
    let Overrides { n_estimators, max_depth, learning_rate, max_iter } = overrides;
    let config = match config {
        ModelConfig::Logistic(mut c) => {
            reject_flag("n-estimators", n_estimators)?;
            reject_flag("max-depth", max_depth)?;
            if let Some(v) = max_iter {
                c.max_iter = v;
            }
            if let Some(v) = learning_rate {
                c.learning_rate = v;
            }
            ModelConfig::Logistic(c)
        }
        ModelConfig::RandomForest(mut c) => {
            reject_flag("learning-rate", learning_rate)?;
            reject_flag("max-iter", max_iter)?;
            if let Some(v) = n_estimators {
                c.n_estimators = v;
            }
            if let Some(v) = max_depth {
                c.max_depth = v;
            }
            ModelConfig::RandomForest(c)
        }
        ModelConfig::GradientBoosting(mut c) => {
            reject_flag("max-iter", max_iter)?;
            if let Some(v) = n_estimators {
                c.n_estimators = v;
            }
            if let Some(v) = max_depth {
                c.max_depth = v;
            }
            if let Some(v) = learning_rate {
                c.learning_rate = v;
            }
            ModelConfig::GradientBoosting(c)
        }
    };
    Ok(config)
}

fn reject_flag<T>(name: &str, value: Option<T>) -> anyhow::Result<()> {
    if value.is_some() {
        return Err(anyhow!("--{name} does not apply to this model family"));
    }
    Ok(())
}
