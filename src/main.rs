use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::{self, Write};
use std::path::PathBuf;

use racepred::config::PredictorConfig;
use racepred::error::{ErrorSeverity, RacePredError};
use racepred::logging::init_logging;
use racepred::parsing::{parse_distance, parse_performance};
use racepred::predictor::RacePredictor;
use racepred::report::{write_equivalents, write_prediction, OutputFormat};

/// racepred - Race Time Predictor
///
/// Predicts a finishing time at one distance from a race at another, using
/// the Purdy points (table and least squares), VO2max, Cameron and Riegel
/// models, and reports their average.
#[derive(Parser)]
#[command(name = "racepred")]
#[command(version)]
#[command(about = "Race time predictor", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the time for one target distance
    Predict {
        /// Known race distance (meters; suffix m/mi for miles, k/km for kilometers)
        #[arg(short, long)]
        distance: String,

        /// Known race time (h:m:s, m:s or seconds)
        #[arg(short, long)]
        time: String,

        /// Target distance, same notation as --distance
        #[arg(short = 'p', long)]
        predict: String,

        /// Output format (text, json, csv)
        #[arg(short = 'f', long)]
        format: Option<OutputFormat>,
    },

    /// Predict times at every standard race distance
    Equivalents {
        /// Known race distance
        #[arg(short, long)]
        distance: String,

        /// Known race time
        #[arg(short, long)]
        time: String,

        /// Output format (text, json, csv)
        #[arg(short = 'f', long)]
        format: Option<OutputFormat>,
    },

    /// Show or create the configuration file
    Config {
        /// Print the effective configuration as TOML
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // `config --init` creates the file the other commands would load
    let initialized = match &cli.command {
        Commands::Config { init: true, .. } => {
            let path = config_path(&cli);
            let config = PredictorConfig::init_file(&path)?;
            println!("{} {}", "✓ Wrote default configuration to".green(), path.display());
            Some(config)
        }
        _ => None,
    };

    let config = match (initialized, &cli.config) {
        (Some(config), _) => config,
        (None, Some(path)) => PredictorConfig::load_from_file(path)?,
        (None, None) => PredictorConfig::load_or_default(),
    };

    let mut log_config = config.logging.clone();
    log_config.level = log_config.level.raised_by(cli.verbose);
    init_logging(&log_config).context("Failed to initialize logging")?;

    if cli.verbose > 0 {
        eprintln!(
            "{}",
            format!("Log level: {}", log_config.level.to_filter()).dimmed()
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Predict {
            distance,
            time,
            predict,
            format,
        } => {
            let record = parse_performance(&distance, &time).map_err(|e| fail(e.into()))?;
            let target = parse_distance(&predict).map_err(|e| fail(e.into()))?;

            let report = RacePredictor::from_config(&config)
                .predict(&record, target)
                .map_err(|e| fail(e.into()))?;

            write_prediction(
                &mut out,
                &report,
                format.unwrap_or(config.output.format),
                config.output.units,
            )
            .map_err(fail)?;
        }

        Commands::Equivalents {
            distance,
            time,
            format,
        } => {
            let record = parse_performance(&distance, &time).map_err(|e| fail(e.into()))?;

            let reports = RacePredictor::from_config(&config)
                .equivalents(&record)
                .map_err(|e| fail(e.into()))?;

            write_equivalents(
                &mut out,
                &reports,
                format.unwrap_or(config.output.format),
                config.output.units,
            )
            .map_err(fail)?;
        }

        Commands::Config { show, init } => {
            let path = config_path(&cli);

            if show {
                let toml_content = toml::to_string_pretty(&config)
                    .context("Failed to serialize configuration to TOML")?;
                write!(out, "{}", toml_content)?;
            }

            if !show && !init {
                let state = if path.exists() { "found" } else { "not found, using defaults" };
                println!("Config file: {} ({})", path.display(), state);
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn config_path(cli: &Cli) -> PathBuf {
    cli.config
        .clone()
        .unwrap_or_else(PredictorConfig::default_config_path)
}

/// Log a library error at its severity and turn it into a user-facing message
fn fail(err: RacePredError) -> anyhow::Error {
    match err.severity() {
        ErrorSeverity::Critical | ErrorSeverity::Error => {
            tracing::error!(error = %err, "command failed")
        }
        ErrorSeverity::Warning => tracing::warn!(error = %err, "command failed"),
    }
    anyhow!(err.user_message())
}
