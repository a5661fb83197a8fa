//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own route table, so view load
//! state never leaks between tests.

use super::constants::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use toolbox_server::router::RouteTable;
use toolbox_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use toolbox_server::views::ViewLimits;
use toolbox_server::Catalog;

/// Test server instance backed by the built-in catalog
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// The route table served by this instance, for inspecting load state
    pub routes: Arc<RouteTable>,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if the port cannot be bound or the server doesn't become ready
    /// within [`SERVER_READY_TIMEOUT_MS`].
    pub async fn spawn() -> Self {
        let catalog = Catalog::builtin();
        let routes = Arc::new(RouteTable::from_catalog(
            catalog,
            &ViewLimits::default(),
            Some(Duration::from_secs(5)),
        ));
        Self::spawn_with(catalog, routes).await
    }

    /// Spawns a server for a caller-provided route table
    pub async fn spawn_with(catalog: Catalog, routes: Arc<RouteTable>) -> Self {
        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            content_cache_age_sec: 0, // Disable caching in tests
            max_body_bytes: TEST_MAX_BODY_BYTES,
            ..Default::default()
        };

        let app = make_app(config, catalog, routes.clone());

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            routes,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
