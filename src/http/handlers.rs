//! Route handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::gateway::Submission;
use crate::http::request::{decode_certificate, validate_address, FaucetParams, RegisterParams};
use crate::http::response::ApiError;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FaucetStatus {
    pub faucet_address: String,
    pub amount: String,
    pub denom: String,
}

/// `GET /health`, answered without touching the client binary.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

/// `GET /` and `GET /status`: the faucet address and the amount it sends.
pub async fn status(State(state): State<AppState>) -> Result<Json<FaucetStatus>, ApiError> {
    let faucet_address = state.gateway.get_address().await?;
    let chain = state.gateway.chain();

    Ok(Json(FaucetStatus {
        faucet_address,
        amount: chain.faucet_amount.clone(),
        denom: chain.denom.clone(),
    }))
}

/// `GET /faucet?address=<addr>`: send tokens, answer with the tx hash.
pub async fn faucet(
    State(state): State<AppState>,
    Query(params): Query<FaucetParams>,
) -> Result<Json<String>, ApiError> {
    let destination = validate_address(params.address)?;

    tracing::info!(destination = %destination, "Faucet request");

    let hash = state
        .gateway
        .submit(Submission::Faucet { destination: &destination })
        .await?;

    Ok(Json(hash.into()))
}

/// `GET /register?cert=<base64>`: register a node, answer with the tx hash.
pub async fn register(
    State(state): State<AppState>,
    Query(params): Query<RegisterParams>,
) -> Result<Json<String>, ApiError> {
    let certificate = decode_certificate(params.cert)?;

    tracing::info!(cert_bytes = certificate.len(), "Registration request");

    let hash = state
        .gateway
        .submit(Submission::Register { certificate: &certificate })
        .await?;

    Ok(Json(hash.into()))
}
