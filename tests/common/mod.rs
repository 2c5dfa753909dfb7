//! Shared utilities for integration and load testing.

use std::net::SocketAddr;

use product_service::config::ServiceConfig;
use product_service::http::HttpServer;
use product_service::lifecycle::Shutdown;
use product_service::store::SharedStore;
use tokio::net::TcpListener;

/// A running service bound to an ephemeral local port.
pub struct TestService {
    pub addr: SocketAddr,
    /// The store behind the running server, for direct inspection.
    #[allow(dead_code)]
    pub store: SharedStore,
    shutdown: Shutdown,
}

impl TestService {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the service with default configuration on `127.0.0.1:0`.
pub async fn spawn_service() -> TestService {
    spawn_service_with(ServiceConfig::default()).await
}

/// Start the service with `config` on `127.0.0.1:0`; the bind address is replaced.
#[allow(dead_code)]
pub async fn spawn_service_with(mut config: ServiceConfig) -> TestService {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let store = SharedStore::new();
    let server = HttpServer::with_store(config, store.clone());

    // The listener is already bound, so requests queue until `run` accepts them.
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestService {
        addr,
        store,
        shutdown,
    }
}

/// A reqwest client that does not go through any system proxy.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
