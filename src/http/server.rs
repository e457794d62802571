//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, security headers)
//! - Spawn the one-second window ticker
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::SimulatorConfig;
use crate::http::handlers;
use crate::simulation::headers::SECURITY_HEADERS;
use crate::simulation::sanitizer::PatternError;
use crate::simulation::{CsrfVault, RateLimiter, Sanitizer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub limiter: Arc<RateLimiter>,
    pub sanitizer: Arc<Sanitizer>,
    pub csrf: Arc<CsrfVault>,
}

/// HTTP server for the simulator.
pub struct HttpServer {
    router: Router,
    limiter: Arc<RateLimiter>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the built-in threat catalogue does not compile.
    pub fn new(config: SimulatorConfig) -> Result<Self, PatternError> {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
        let sanitizer = Arc::new(Sanitizer::new()?);

        let state = AppState {
            limiter: limiter.clone(),
            sanitizer,
            csrf: Arc::new(CsrfVault::new()),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, limiter })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &SimulatorConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/submit", post(handlers::submit))
            .route("/api/status", get(handlers::status))
            .route("/api/analyze", post(handlers::analyze))
            .route("/api/csrf/token", get(handlers::issue_csrf_token))
            .route("/api/csrf/verify", post(handlers::verify_csrf_token))
            .route("/api/headers", get(handlers::list_security_headers))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(middleware::from_fn(security_headers_middleware)),
            )
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// The window ticker subscribes to the same shutdown channel, so
    /// stopping the server also cancels the countdown timer.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let ticker = spawn_window_ticker(self.limiter.clone(), shutdown.resubscribe());

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = shutdown.recv() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        // Covers the Ctrl+C path, where the broadcast never fires.
        ticker.abort();

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Deliver one `tick` per second to every rate window until shutdown.
fn spawn_window_ticker(
    limiter: Arc<RateLimiter>,
    mut shutdown: broadcast::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first interval tick completes immediately; swallow it so
        // blocked windows get a full first second.
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => limiter.tick_all(),
                _ = shutdown.recv() => break,
            }
        }
        tracing::debug!("Window ticker stopped");
    })
}

/// Stamp the full security-header catalogue onto every response.
async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    for header in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(header.name),
            HeaderValue::from_static(header.value),
        );
    }
    response
}
