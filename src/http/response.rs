//! Response handling and error mapping.
//!
//! # Design Decisions
//! - Client errors carry a JSON `{"error": ...}` body
//! - Gateway failures become a bare 500; the detail stays in the logs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::gateway::GatewayError;

/// Error returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Anything that went wrong past validation.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                tracing::info!(reason = %message, "Rejected request");
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: &message })).into_response()
            }
            ApiError::Gateway(e) => {
                tracing::error!(error = %e, kind = e.kind(), "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
