//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, amount is a positive integer)
//! - Keep the request deadline beyond the worst case of the commands it runs
//! - Check the node address forms a usable `tcp://` URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::GatewayConfig;

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `chain.faucet_amount`.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let chain = &config.chain;
    for (field, value) in [
        ("chain.binary", &chain.binary),
        ("chain.chain_id", &chain.chain_id),
        ("chain.wallet_name", &chain.wallet_name),
        ("chain.denom", &chain.denom),
        ("chain.gas_prices", &chain.gas_prices),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::new(field, "must not be empty"));
        }
    }

    match chain.faucet_amount.parse::<u128>() {
        Ok(0) => errors.push(ValidationError::new("chain.faucet_amount", "must be greater than zero")),
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::new(
            "chain.faucet_amount",
            format!("'{}' is not an unsigned integer", chain.faucet_amount),
        )),
    }

    if chain.register_gas == 0 {
        errors.push(ValidationError::new("chain.register_gas", "must be greater than zero"));
    }

    match url::Url::parse(&format!("tcp://{}", chain.rpc_url)) {
        Ok(parsed) if parsed.host_str().is_some_and(|host| !host.is_empty()) => {}
        _ => errors.push(ValidationError::new(
            "chain.rpc_url",
            format!("'{}' is not a host:port node address", chain.rpc_url),
        )),
    }

    if config.timeouts.command_secs == 0 {
        errors.push(ValidationError::new("timeouts.command_secs", "must be greater than zero"));
    }
    // A faucet request runs two commands back to back.
    if config.timeouts.request_secs < config.timeouts.command_secs.saturating_mul(2) {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            "must be at least twice timeouts.command_secs",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
