use anyhow::Result;
use clap::Parser;
use tracing::info;

use checkin_infrastructure::{AppConfig, CONFIG_ENV};

#[derive(Parser, Debug)]
#[command(name = "checkin-server")]
#[command(about = "Event check-in verification server", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Load and validate the configuration, then exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var(CONFIG_ENV, config);
    }

    let startup = checkin_bootstrap::telemetry::startup_subscriber();
    let config = AppConfig::load().await?;
    drop(startup);
    let _log_guard = checkin_bootstrap::telemetry::init_tracing(&config)?;

    if args.check_config {
        info!("configuration ok, {} seeded events", config.pins.len());
        return Ok(());
    }

    checkin_bootstrap::run_standalone(config).await
}
