//! Startup orchestration.
//!
//! Load config → init logging → init metrics → bind → serve until a signal.
//! Any startup error is fatal.

use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use crate::config::{load_config, ConfigError, TodoApiConfig};
use crate::http::HttpServer;
use crate::lifecycle::{signals::wait_for_signal, Shutdown};
use crate::observability::{logging::init_logging, metrics::init_metrics};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Options that come from the command line.
#[derive(Debug, Default, Clone)]
pub struct StartupOptions {
    pub config_path: Option<PathBuf>,
    pub bind_override: Option<String>,
}

/// Resolve the effective configuration.
pub fn resolve_config(options: &StartupOptions) -> Result<TodoApiConfig, ConfigError> {
    let mut config = match &options.config_path {
        Some(path) => load_config(path)?,
        None => TodoApiConfig::default(),
    };
    if let Some(bind) = &options.bind_override {
        config.listener.bind_address = bind.clone();
        crate::config::validation::validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

/// Run the service until SIGINT/SIGTERM.
pub async fn start(options: StartupOptions) -> Result<(), StartupError> {
    let config = resolve_config(&options)?;
    init_logging(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "todo-api starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        free_todo_limit = config.quota.free_todo_limit,
        strict_deadlines = config.deadlines.strict,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
