use anyhow::{Context, Result};
use clap::Parser;
use huddle_server::logger::init_tracing;
use huddle_server::{RoomDirectory, RouterHandle, ServerConfig, SignalingRouter, app};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();
    init_tracing(&config.log_level);

    info!("Initializing signaling server...");

    let router = SignalingRouter::new(Box::new(RoomDirectory::new())).spawn(config.command_buffer);

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr()))?;
    info!("Signaling server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app(router.clone()))
        .with_graceful_shutdown(shutdown_signal(router))
        .await
        .context("HTTP server failed")?;

    info!("Signaling server stopped");
    Ok(())
}

async fn shutdown_signal(router: RouterHandle) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }

    info!("Shutdown requested, clearing rooms");
    if let Err(e) = router.shutdown().await {
        warn!("Router already stopped: {}", e);
    }
}
