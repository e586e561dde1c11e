//! CLI entry point for one-off predictions.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use score_inference::{ArtifactConfig, PredictPipeline, StudentRecord};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Predict a student's math score from a JSON record",
    long_about = "Scores one student record against the fitted preprocessor and model.\n\n\
                  EXAMPLES:\n  \
                  score-predict -i record.json\n\n  \
                  score-predict -i record.json --artifacts-dir /srv/models --json"
)]
struct Args {
    /// Path to a JSON file holding one student record
    #[arg(short, long)]
    input: PathBuf,

    /// Directory containing preprocessor.json and model.json
    #[arg(short, long, default_value = "artifacts")]
    artifacts_dir: PathBuf,

    /// Print {"predictions": [...]} instead of a human-readable line
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so `--json` output stays clean on stdout.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    if !args.input.exists() {
        return Err(anyhow!("Input file not found: {}", args.input.display()));
    }

    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let record: StudentRecord = serde_json::from_str(&raw)
        .with_context(|| format!("parsing student record from {}", args.input.display()))?;

    let pipeline = PredictPipeline::new(ArtifactConfig::from_dir(&args.artifacts_dir));
    let predictions = pipeline.predict(&record)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({ "predictions": predictions }))?
        );
    } else {
        let context = pipeline.context()?;
        for score in &predictions {
            println!("Predicted {}: {:.2}", context.model().target, score);
        }
        info!("Scored with model '{}'", context.model().name);
    }

    Ok(())
}
