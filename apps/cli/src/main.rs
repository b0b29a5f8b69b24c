//! Riskline CLI - credit-default scoring pipeline
//!
//! One binary covering the offline and serving sides: prepare the dataset,
//! train candidate families into the run registry, inspect the champion,
//! and score applicants one at a time or in batches.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "riskline",
    author,
    version,
    about = "Credit-default scoring: preprocess, train, select, predict"
)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Configuration file
    #[arg(short, long, default_value = "riskline.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a labeled CSV, fit the scaler, persist the scaled splits
    Prepare {
        /// Raw training CSV
        #[arg(long)]
        data: PathBuf,

        /// Label column (overrides config)
        #[arg(long)]
        label: Option<String>,

        /// Fraction of rows held out for testing
        #[arg(long, default_value_t = 0.2)]
        test_fraction: f64,

        /// Split seed
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Train one model family and record the trial in the registry
    Train {
        /// Model family: logistic, random-forest, gradient-boosting
        #[arg(long)]
        family: String,

        /// Trees in the ensemble (forest, boosting)
        #[arg(long)]
        n_estimators: Option<u32>,

        /// Tree depth limit (forest, boosting)
        #[arg(long)]
        max_depth: Option<u32>,

        /// Step size (logistic, boosting)
        #[arg(long)]
        learning_rate: Option<f64>,

        /// Gradient descent iteration cap (logistic)
        #[arg(long)]
        max_iter: Option<u32>,
    },

    /// Show the experiment's trials and the current champion
    Best,

    /// Score one applicant from a JSON record
    Predict {
        /// JSON object mapping field names to values
        #[arg(long)]
        input: PathBuf,

        /// Append the result to a CSV history file
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Score a CSV of applicants with the champion model
    Batch {
        /// CSV with one applicant per row
        #[arg(long)]
        input: PathBuf,

        /// Output CSV of predictions
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber =
        FmtSubscriber::builder().with_max_level(level).without_time().with_target(false).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = config::CliConfig::load(&args.config)?;

    match args.command {
        Command::Prepare { data, label, test_fraction, seed } => {
            commands::prepare::run(&config, &data, label.as_deref(), test_fraction, seed)
        }
        Command::Train { family, n_estimators, max_depth, learning_rate, max_iter } => {
            commands::train::run(
                &config,
                &family,
                commands::train::Overrides { n_estimators, max_depth, learning_rate, max_iter },
            )
        }
        Command::Best => commands::best::run(&config),
        Command::Predict { input, history } => {
            commands::predict::run(&config, &input, history.as_deref())
        }
        Command::Batch { input, output } => commands::batch::run(&config, &input, &output),
    }
}
