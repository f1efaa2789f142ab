//! Gateway error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The logical path could not be resolved against the backend origin.
    /// Fails fast; nothing is forwarded to a guessed URL.
    #[error("invalid forward path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    /// The outbound request to the backend failed.
    #[error("backend request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The inbound request body could not be read.
    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::InvalidPath { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Body(_) => StatusCode::BAD_REQUEST,
        };

        tracing::warn!("Gateway error: {}", self);

        (
            status,
            Json(json!({
                "success": false,
                "error": self.to_string(),
            })),
        )
            .into_response()
    }
}
