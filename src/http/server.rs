//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, request timeout)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use axum::{http::StatusCode, middleware, routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::gateway::Gateway;
use crate::http::handlers;
use crate::http::request::{make_request_span, track_deadline, X_REQUEST_ID};
use crate::lifecycle::shutdown::requested;
use crate::lifecycle::signals::shutdown_signal;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server that invokes the configured client binary.
    pub fn new(config: GatewayConfig) -> Self {
        let gateway = Arc::new(Gateway::new(&config));
        Self::with_gateway(config, gateway)
    }

    /// Create a server around an existing gateway.
    pub fn with_gateway(config: GatewayConfig, gateway: Arc<Gateway>) -> Self {
        let router = Self::build_router(&config, AppState { gateway });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The outer deadline answers 500 like any other gateway failure; the
    /// only statuses a client sees are 200, 400, 404 and 500.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let deadline = config.timeouts.request();
        Router::new()
            .route("/", get(handlers::status))
            .route("/status", get(handlers::status))
            .route("/health", get(handlers::health))
            .route("/faucet", get(handlers::faucet))
            .route("/register", get(handlers::register))
            .with_state(state)
            .layer(middleware::from_fn_with_state(deadline, track_deadline))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::INTERNAL_SERVER_ERROR,
                deadline,
            ))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// Run the server until Ctrl+C, SIGTERM, or a message on `shutdown`.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            chain_id = %self.config.chain.chain_id,
            wallet = %self.config.chain.wallet_name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = requested(&mut shutdown) => {
                        tracing::info!("Shutdown requested");
                    }
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::command::CommandSpec;
    use crate::gateway::types::InvocationError;
    use crate::gateway::{CommandRunner, ProcessOutput};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::time::{Duration, Instant};
    use tower::ServiceExt;

    /// A client that never answers.
    struct StalledRunner;

    #[async_trait]
    impl CommandRunner for StalledRunner {
        async fn run(&self, _spec: &CommandSpec) -> Result<ProcessOutput, InvocationError> {
            std::future::pending().await
        }
    }

    fn server() -> HttpServer {
        let mut config = GatewayConfig::default();
        // Never reached by these requests.
        config.chain.binary = "/nonexistent/secretd".to_string();
        HttpServer::new(config)
    }

    async fn get(server: &HttpServer, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = server
            .router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        (status, headers, body.to_vec())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, headers, body) = get(&server(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers.contains_key(X_REQUEST_ID));

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_faucet_requires_address() {
        let (status, _, body) = get(&server(), "/faucet").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, br#"{"error":"address is required"}"#);
    }

    #[tokio::test]
    async fn test_register_rejects_bad_base64() {
        let (status, _, _) = get(&server(), "/register?cert=%21%21%21").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_binary_is_server_error() {
        let (status, _, body) = get(&server(), "/faucet?address=secret1dest").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _, _) = get(&server(), "/admin").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_deadline_is_server_error() {
        let mut config = GatewayConfig::default();
        config.timeouts.request_secs = 1;
        let gateway = Arc::new(Gateway::with_runner(&config, Arc::new(StalledRunner)));
        let server = HttpServer::with_gateway(config, gateway);

        let start = Instant::now();
        let (status, _, body) = get(&server, "/faucet?address=secret1dest").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.is_empty());
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
