//! Startup orchestration.
//!
//! Observability first, then the listener, then traffic. Any startup error
//! is fatal.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::{logging, metrics};

/// Errors that abort startup or end serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

/// Initialize logging and metrics from configuration.
pub fn init_observability(config: &ServiceConfig) -> Result<(), StartupError> {
    logging::init_logging(&config.observability);

    if config.observability.metrics_enabled {
        // Validation already checked the address.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr)?;
        }
    }
    Ok(())
}

/// Bind, serve, and return once a termination signal has drained the server.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    init_observability(&config)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_body_bytes = config.limits.max_body_bytes,
        request_timeout_secs = config.limits.request_timeout_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let _signals = signals::spawn_signal_handler(shutdown);

    HttpServer::new(config).run(listener, server_shutdown).await?;
    Ok(())
}
