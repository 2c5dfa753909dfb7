//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the product routes
//! - Wire up middleware (request ID, tracing, limits, timeout, metrics)
//! - Force `Connection: close` on every response
//! - Bind server to listener and shut down on signal

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request},
    middleware, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::{request_id_of, UuidRequestId, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routing::product_routes;
use crate::store::SharedStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

/// HTTP server for the product service.
pub struct HttpServer {
    router: Router,
    store: SharedStore,
}

impl HttpServer {
    /// Create a new HTTP server with an empty store.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_store(config, SharedStore::new())
    }

    /// Create a server around an existing store.
    pub fn with_store(config: ServiceConfig, store: SharedStore) -> Self {
        let state = AppState {
            store: store.clone(),
        };

        let router = Self::build_router(&config, state);
        Self { router, store }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The `ServiceBuilder` stack runs top to bottom: `Connection: close` is
    /// set on every response (including 404/405 and timeouts), and the
    /// request ID exists before the trace span opens.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let request_span = |request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id_of(request),
            )
        };

        product_routes()
            .with_state(state)
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(
                ServiceBuilder::new()
                    .layer(SetResponseHeaderLayer::overriding(
                        header::CONNECTION,
                        HeaderValue::from_static("close"),
                    ))
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span))
                    .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.limits.request_timeout_secs,
                    ))),
            )
    }

    /// The fully layered router, for driving without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle to the store this server mutates.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Run the server, accepting connections until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
