//! Gateway server - Axum HTTP server
//!
//! Exposes the backend's logical routes and relays each one through the
//! forwarding layer. The server holds no per-request state; everything it
//! needs is the shared upstream client.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Path, Request, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::GatewayError;
use super::forward::{encode_path_segment, forward_request};
use super::upstream::UpstreamClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<UpstreamClient>,
}

/// Gateway server instance
pub struct GatewayServer {
    host: String,
    port: u16,
    state: AppState,
}

impl GatewayServer {
    pub fn new(host: String, port: u16, upstream: Arc<UpstreamClient>) -> Self {
        Self {
            host,
            port,
            state: AppState { upstream },
        }
    }

    /// Build the router. Separate from `run` so tests can drive it directly.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            // Health check
            .route("/healthz", get(health_check_handler))
            .route("/health", get(health_check_handler))
            // Backend passthrough
            .route("/api/auth/login", post(forward_login))
            .route("/api/tables", get(forward_tables))
            .route("/api/tables/:table", get(forward_table_detail))
            .route("/api/execute", post(forward_execute))
            .route("/api/history", get(forward_history))
            .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the gateway server (blocking)
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        tracing::info!(
            "Gateway listening on {} (backend {})",
            addr,
            self.state.upstream.base_url()
        );

        // Handle graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Gateway stopped");
        Ok(())
    }
}

async fn forward_login(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, GatewayError> {
    forward_request(&state.upstream, "/api/auth/login", request).await
}

async fn forward_tables(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, GatewayError> {
    forward_request(&state.upstream, "/api/tables", request).await
}

async fn forward_table_detail(
    State(state): State<AppState>,
    Path(table): Path<String>,
    request: Request,
) -> Result<Response, GatewayError> {
    let path = format!("/api/tables/{}", encode_path_segment(&table));
    forward_request(&state.upstream, &path, request).await
}

async fn forward_execute(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, GatewayError> {
    forward_request(&state.upstream, "/api/execute", request).await
}

async fn forward_history(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, GatewayError> {
    forward_request(&state.upstream, "/api/history", request).await
}

/// Health check handler
async fn health_check_handler() -> Response {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))).into_response()
}

/// Shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
