//! `riskline best`: list trials and show the champion.

use crate::config::CliConfig;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use riskline_registry::{select_best, RunRegistry};

pub fn run(config: &CliConfig) -> anyhow::Result<()> {
    let registry = RunRegistry::new(&config.registry_root);
    let champion = select_best(&registry, &config.experiment)?;
    let trials = registry.query_trials(&config.experiment)?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["run", "model", "accuracy", "created", ""]);
    for trial in &trials {
        let marker = if trial.run_id == champion.run_id { "champion" } else { "" };
        table.add_row(vec![
            trial.run_id.to_string(),
            trial.run_name.clone(),
            format!("{:.4}", trial.accuracy().unwrap_or_default()),
            trial.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            marker.to_string(),
        ]);
    }
    println!("{table}");

    println!(
        "{} run {} ({}) accuracy {:.4}",
        "best:".green().bold(),
        champion.run_id,
        champion.run_name,
        champion.accuracy().unwrap_or_default()
    );
    Ok(())
}
