//! Shared utilities for integration tests.

use std::net::SocketAddr;
use tokio::net::TcpListener;
use todo_api::config::TodoApiConfig;
use todo_api::http::HttpServer;
use todo_api::lifecycle::Shutdown;

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server with the given config, bound to `127.0.0.1:0`.
pub async fn start_server(mut config: TodoApiConfig) -> TestServer {
    config.listener.bind_address = "127.0.0.1:0".into();
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestServer { addr, shutdown }
}

#[allow(dead_code)]
pub async fn start_default_server() -> TestServer {
    start_server(TodoApiConfig::default()).await
}
