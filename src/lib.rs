pub mod api;
pub mod capture;
pub mod chat;
pub mod config;
pub mod core_state;
pub mod db;
pub mod directory;
pub mod hospitals;
pub mod intent;
pub mod models;
pub mod portal;
pub mod render;
pub mod speech;
pub mod store;
pub mod symptoms;
pub mod views;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Startup failures of the portal host.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Core(#[from] core_state::CoreError),
    #[error(transparent)]
    Server(#[from] api::server::ServerError),
}

/// Start the portal host and serve until Ctrl-C.
pub async fn run() -> Result<(), RunError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = config::PortalConfig::from_env()?;
    let bind = config.bind;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        voice = config.voice_enabled,
        "Configuration loaded"
    );

    let core = Arc::new(core_state::CoreState::open(config)?);
    let mut server = api::server::start_server(core, bind).await?;
    tracing::info!(addr = %server.session.server_addr, "Portal ready");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {e}");
    }
    server.shutdown();
    server.wait().await;
    Ok(())
}
