//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use vitrine::config::SiteConfig;
use vitrine::http::HttpServer;
use vitrine::lifecycle::Shutdown;

pub const ADMIN_KEY: &str = "test-admin-key";

/// A config with the admin API enabled and a known key.
pub fn test_config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.admin.enabled = true;
    config.admin.api_key = ADMIN_KEY.to_string();
    config
}

/// Start the backend on an ephemeral port.
///
/// The returned `Shutdown` must be kept alive for the duration of the test;
/// dropping it stops the server.
pub async fn spawn_server(config: SiteConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let (_config_tx, config_updates) = mpsc::unbounded_channel();

    let server = HttpServer::new(config).expect("failed to build server");
    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    // Wait for the listener task to start accepting.
    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, shutdown)
}

#[allow(dead_code)]
pub fn bearer(key: &str) -> String {
    format!("Bearer {}", key)
}
