//! Web server entry point.

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use score_inference::ArtifactConfig;
use score_server::routes::routes;
use score_server::{AppState, ServerConfig};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Student score prediction web server",
    long_about = "Serves an HTML form that predicts a student's math score.\n\n\
                  EXAMPLES:\n  \
                  # Serve on the default address, loading artifacts on first use\n  \
                  score-server\n\n  \
                  # Fail at startup if the artifacts are unusable\n  \
                  score-server --eager-load --artifacts-dir /srv/models --port 8080"
)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to bind
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Directory containing preprocessor.json and model.json
    #[arg(short, long, default_value = "artifacts")]
    artifacts_dir: PathBuf,

    /// Directory served under /static
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Load artifacts before serving; abort if they cannot be loaded
    #[arg(long)]
    eager_load: bool,

    /// Map the form's reading/writing scores onto the same-named record fields
    ///
    /// By default the two are swapped, matching the historical form handler
    #[arg(long)]
    straight_score_fields: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        ServerConfig {
            host: args.host,
            port: args.port,
            artifacts: ArtifactConfig::from_dir(&args.artifacts_dir),
            static_dir: args.static_dir,
            eager_load: args.eager_load,
            swap_score_fields: !args.straight_score_fields,
        }
    }
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (RUST_LOG among them)
    dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level);

    let config = ServerConfig::from(args);
    config.validate()?;

    let addr = config.bind_addr();
    let state = AppState::new(config).context("loading prediction artifacts")?;
    if state.pipeline.is_loaded() {
        info!("Artifacts ready");
    }

    info!("Listening on http://{}", addr);
    warp::serve(routes(Arc::new(state))).run(addr).await;

    Ok(())
}
