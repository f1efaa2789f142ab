use std::path::PathBuf;
use std::sync::Arc;

use sqlrunner_core::config::load_config;
use sqlrunner_core::{GatewayServer, UpstreamClient};

pub async fn run(config_path: Option<PathBuf>, port_override: Option<u16>) -> anyhow::Result<()> {
    // Load configuration
    let mut config = load_config(config_path)?;

    // Apply port override if provided
    if let Some(port) = port_override {
        config.server.port = port;
    }

    let upstream = Arc::new(UpstreamClient::new(Some(config.backend.base_url.clone()))?);

    tracing::info!("Starting SQL Runner gateway...");
    tracing::info!("  Host: {}", config.server.bind_host());
    tracing::info!("  Port: {}", config.server.port);
    tracing::info!("  Backend: {}", upstream.base_url());

    let server = GatewayServer::new(
        config.server.bind_host().to_string(),
        config.server.port,
        upstream,
    );

    tracing::info!(
        "Gateway starting on http://{}:{}",
        config.server.bind_host(),
        config.server.port
    );
    tracing::info!("Press Ctrl+C to stop");

    // Run server (blocks until shutdown)
    server.run().await?;

    Ok(())
}
