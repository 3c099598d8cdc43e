//! Payroll engine HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

/// Gross-to-net payroll calculation server.
#[derive(Parser, Debug)]
#[command(name = "payroll-engine", version, about)]
struct Cli {
    /// Directory holding payroll.yaml and rate_tables/.
    #[arg(long, env = "PAYROLL_CONFIG_DIR", default_value = "./config/hu")]
    config_dir: PathBuf,

    /// Address to listen on.
    #[arg(long, env = "PAYROLL_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    let config = ConfigLoader::load(&cli.config_dir).map_err(|err| {
        error!(config_dir = %cli.config_dir.display(), error = %err, "Failed to load configuration");
        err
    })?;
    for table in config.rate_tables() {
        info!(
            version = %table.version,
            effective_date = %table.effective_date,
            "Rate table available"
        );
    }

    let router = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(cli.bind).await.map_err(|err| {
        error!(bind = %cli.bind, error = %err, "Failed to bind");
        err
    })?;
    info!(address = %cli.bind, "Payroll engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
