//! NutriMood command line entry point
//!
//! Writes the inference result as JSON to stdout, or an error result to
//! stderr with a non-zero exit status. Logs go to stderr.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nutrimood::{
    AppConfig, AppError, ArtifactPaths, ErrorResult, ModelArtifacts, NutritionProfile, Pipeline,
};

#[derive(Debug, Parser)]
#[command(name = "nutrimood", about = "NutriMood mood prediction and food recommendation", version)]
struct Cli {
    /// Calorie level (0-3)
    #[arg(long, allow_negative_numbers = true)]
    calorie: i64,

    /// Protein level (0-3)
    #[arg(long, allow_negative_numbers = true)]
    protein: i64,

    /// Fat level (0-3)
    #[arg(long, allow_negative_numbers = true)]
    fat: i64,

    /// Carbohydrate level (0-3)
    #[arg(long, allow_negative_numbers = true)]
    carb: i64,

    /// Directory containing model files [default: models]
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Number of foods to recommend [default: 5]
    #[arg(long)]
    top_n: Option<usize>,

    /// Print single-line JSON instead of indented output
    #[arg(long)]
    compact: bool,
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config from environment: {e}, using defaults");
        AppConfig::default()
    });

    let mut artifact_config = config.artifacts.clone();
    if let Some(dir) = &cli.model_dir {
        artifact_config.dir = dir.clone();
    }

    // Unreadable or corrupt artifacts abort before any prediction
    let artifacts = ModelArtifacts::load(&ArtifactPaths::from_config(&artifact_config))
        .context("Error loading models")?;

    let top_n = cli.top_n.unwrap_or(config.recommend.top_n);
    let pipeline = Pipeline::new(Arc::new(artifacts)).with_top_n(top_n);

    let profile = NutritionProfile::new(cli.calorie, cli.protein, cli.fat, cli.carb);

    match pipeline.try_infer(&profile) {
        Ok(result) => {
            write_json(std::io::stdout().lock(), &result, cli.compact)
                .context("Failed to write result")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let err = AppError::from(e);
            warn!(code = err.code(), error = %err, "Inference failed");

            let body = ErrorResult::for_profile(&err, &profile);
            write_json(std::io::stderr().lock(), &body, cli.compact)
                .context("Failed to write error result")?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn write_json<W: Write, T: Serialize>(mut out: W, value: &T, compact: bool) -> anyhow::Result<()> {
    if compact {
        serde_json::to_writer(&mut out, value)?;
    } else {
        serde_json::to_writer_pretty(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Initialize the tracing subscriber; output goes to stderr so stdout
/// carries only the result document
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nutrimood=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
