//! Request handling and validation.
//!
//! # Responsibilities
//! - Request ID generation and per-request tracing spans
//! - Query parameter extraction for each route
//! - Input validation before anything reaches the gateway
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Spans record the path only; query strings may carry certificates
//! - Requests abandoned mid-flight are logged; expiry of the outer deadline at warn

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderName, Request};
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::Span;

use crate::http::response::ApiError;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Build the tracing span for an inbound request.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}

/// Logs a request whose future is dropped before it produced a response.
struct InFlight {
    path: String,
    started: Instant,
    deadline: Duration,
    finished: bool,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        if self.started.elapsed() >= self.deadline {
            tracing::warn!(
                path = %self.path,
                elapsed_ms,
                deadline_secs = self.deadline.as_secs(),
                "Request deadline exceeded"
            );
        } else {
            tracing::debug!(path = %self.path, elapsed_ms, "Request abandoned by client");
        }
    }
}

/// Middleware placed inside the outer timeout layer so its expiry is logged.
pub async fn track_deadline(
    State(deadline): State<Duration>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut in_flight = InFlight {
        path: request.uri().path().to_string(),
        started: Instant::now(),
        deadline,
        finished: false,
    };
    let response = next.run(request).await;
    in_flight.finished = true;
    response
}

/// Query string of `GET /faucet`.
#[derive(Debug, Default, Deserialize)]
pub struct FaucetParams {
    pub address: Option<String>,
}

/// Query string of `GET /register`.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterParams {
    pub cert: Option<String>,
}

/// Reject a missing or blank parameter.
pub fn require_param(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!("{} is required", name))),
    }
}

/// Validate a destination address.
///
/// Not a checksum check. Rejects values the client binary would
/// misinterpret as flags or that cannot be an address at all.
pub fn validate_address(value: Option<String>) -> Result<String, ApiError> {
    let address = require_param(value, "address")?;

    if address.starts_with('-') {
        return Err(ApiError::BadRequest("address must not start with '-'".to_string()));
    }
    if address.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(ApiError::BadRequest(
            "address must not contain whitespace or control characters".to_string(),
        ));
    }

    Ok(address)
}

/// Decode the base64 certificate parameter.
pub fn decode_certificate(value: Option<String>) -> Result<Vec<u8>, ApiError> {
    // Form decoding turns an unescaped '+' into a space.
    let encoded = require_param(value.map(|v| v.replace(' ', "+")), "cert")?;

    let certificate = base64::engine::general_purpose::STANDARD
        .decode(encoded.as_bytes())
        .map_err(|e| ApiError::BadRequest(format!("cert is not valid base64: {}", e)))?;

    if certificate.is_empty() {
        return Err(ApiError::BadRequest("cert decodes to an empty certificate".to_string()));
    }

    Ok(certificate)
}
