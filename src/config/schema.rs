//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Chain client invocation settings.
    pub chain: ChainConfig,

    /// Transient file storage.
    pub storage: StorageConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Settings used to build command lines for the chain client binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Client binary, resolved through `PATH` when not absolute.
    pub binary: String,

    /// Node RPC address without scheme (e.g., "localhost:26657").
    pub rpc_url: String,

    /// Target chain identifier.
    pub chain_id: String,

    /// Name of the signing key in the client's keyring.
    pub wallet_name: String,

    /// Amount sent per faucet request, in base denomination units.
    pub faucet_amount: String,

    /// Base denomination appended to the amount.
    pub denom: String,

    /// Gas price flag value.
    pub gas_prices: String,

    /// Gas limit for registration transactions.
    pub register_gas: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            binary: "secretd".to_string(),
            rpc_url: "localhost:26657".to_string(),
            chain_id: "secretdev-1".to_string(),
            wallet_name: "a".to_string(),
            faucet_amount: "1000000000".to_string(),
            denom: "uscrt".to_string(),
            gas_prices: "0.25uscrt".to_string(),
            register_gas: 250_000,
        }
    }
}

/// Where request-scoped files are written.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for decoded certificates awaiting registration.
    pub cert_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cert_dir: std::env::temp_dir(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Deadline for a single child process invocation, in seconds.
    pub command_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl TimeoutConfig {
    pub fn command(&self) -> Duration {
        Duration::from_secs(self.command_secs)
    }

    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            command_secs: 30,
            // Key lookup plus one submission, with headroom.
            request_secs: 90,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
