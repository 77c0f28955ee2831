//! Sender key lookup.
//!
//! # Security
//! - Only public key metadata (name, address) is read from the client
//! - Signing stays inside the client's keyring

use serde::Deserialize;

use crate::gateway::types::{GatewayError, GatewayResult};

/// One entry of `keys list --output json`.
#[derive(Debug, Clone, Deserialize)]
pub struct KeyInfo {
    pub name: String,
    pub address: String,
}

/// Parse the key list and return the address of the first key named `key_name`.
pub fn find_address(raw_output: &[u8], key_name: &str) -> GatewayResult<String> {
    // An empty keyring prints `null` on some client versions.
    let keys: Option<Vec<KeyInfo>> = serde_json::from_slice(raw_output)
        .map_err(|e| GatewayError::MalformedResponse(format!("key list is not valid JSON: {}", e)))?;

    keys.unwrap_or_default()
        .into_iter()
        .find(|key| key.name == key_name)
        .map(|key| key.address)
        .ok_or_else(|| GatewayError::KeyNotFound(key_name.to_string()))
}
