//! Simulator entry point: config, logging, metrics, then serve.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use websec_sim::config::loader::load_config;
use websec_sim::observability::{logging, metrics};
use websec_sim::{HttpServer, Shutdown, SimulatorConfig};

#[derive(Debug, Parser)]
#[command(name = "websec-sim", about = "Educational web-security mechanism simulator")]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SimulatorConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_requests = config.rate_limit.max_requests,
        reset_window_secs = config.rate_limit.reset_window_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
