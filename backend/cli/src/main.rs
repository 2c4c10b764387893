mod app;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use linedrop_config::{Credentials, Settings};
use linedrop_logging::init_logger;

#[derive(Parser)]
#[command(name = "linedrop")]
#[command(about = "LINE webhook that saves image messages to disk")]
#[command(version)]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    let settings = Settings::from_env();
    let _log_guard = init_logger(&settings.log_dir, &settings.log_level)
        .with_context(|| format!("failed to open log directory {}", settings.log_dir.display()))?;

    let server = app::start(&settings, Credentials::load).await?;
    info!(
        bind = %server.local_addr()?,
        save_dir = %settings.save_dir.display(),
        "Starting linedrop"
    );
    server.serve().await
}
