//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use websec_sim::{HttpServer, Shutdown, SimulatorConfig};

/// Start a simulator on `addr` and return its shutdown handle.
///
/// The server runs on a background task; tests must call
/// `Shutdown::trigger` when done so the listener and ticker stop.
pub async fn start_simulator(config: SimulatorConfig, addr: SocketAddr) -> Shutdown {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).expect("built-in patterns must compile");
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Give the server a moment to start accepting.
    tokio::time::sleep(Duration::from_millis(200)).await;
    shutdown
}

/// A reqwest client that ignores any ambient proxy configuration.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client builds")
}
