//! Main entry point for the RNAseek front end

use anyhow::Result;
use rnaseek_core::{create_app, run_server, AppConfig, AppState, HttpSubmitter, IdentityClient, LocalIdentityProvider};
use std::{net::SocketAddr, sync::Arc};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());
    info!("Uploads are forwarded to: {}", config.upload.endpoint);

    let addr: SocketAddr = config.bind_address().parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let submitter = HttpSubmitter::from_config(&config.upload)
        .map_err(|e| anyhow::anyhow!("Failed to create upload client: {}", e))?;

    let provider = LocalIdentityProvider::new(config.identity.clone());
    let identity = IdentityClient::new(Arc::new(provider));

    let state = AppState::new(config, identity, Arc::new(submitter));
    info!("App: {} v{}", state.app_name, state.version);
    info!(
        "Gzip uploads are {}",
        if state.config.upload.decompress_gzip { "decompressed before submission" } else { "submitted as-is" }
    );

    state.spawn_session_restore();

    let app = create_app(state);

    run_server(app, addr).await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            let default_level = if cfg!(debug_assertions) {
                "debug"
            } else {
                "info"
            };

            format!(
                "{}={},rnaseek_core={},tower_http=debug,axum=debug",
                env!("CARGO_CRATE_NAME").replace('-', "_"),
                default_level,
                default_level
            ).into()
        });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
