//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Env { var: &'static str, reason: String },
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Env { var, reason } => write!(f, "Invalid {}: {}", var, reason),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load configuration once at startup.
///
/// Defaults, then the optional TOML file, then environment overrides, then
/// validation. The result is treated as immutable for the process lifetime.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            toml::from_str(&content).map_err(ConfigError::Parse)?
        }
        None => GatewayConfig::default(),
    };

    let config = apply_env_overrides(config, |var| std::env::var(var).ok())?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts the environment so overrides can be exercised without
/// mutating process state.
pub fn apply_env_overrides<F>(mut config: GatewayConfig, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("GATEWAY_BIND_ADDRESS") {
        config.listener.bind_address = v;
    }

    if let Some(v) = get("SECRETD_BINARY") {
        config.chain.binary = v;
    }
    if let Some(v) = get("RPC_URL") {
        config.chain.rpc_url = v;
    }
    if let Some(v) = get("CHAIN_ID") {
        config.chain.chain_id = v;
    }
    if let Some(v) = get("FAUCET_WALLET_NAME") {
        config.chain.wallet_name = v;
    }
    if let Some(v) = get("FAUCET_AMOUNT") {
        config.chain.faucet_amount = v;
    }
    if let Some(v) = get("DENOM") {
        config.chain.denom = v;
    }
    if let Some(v) = get("GAS_PRICES") {
        config.chain.gas_prices = v;
    }
    if let Some(v) = get("REGISTER_GAS") {
        config.chain.register_gas = parse_var("REGISTER_GAS", &v)?;
    }

    if let Some(v) = get("CERT_DIR") {
        config.storage.cert_dir = v.into();
    }

    if let Some(v) = get("COMMAND_TIMEOUT_SECS") {
        config.timeouts.command_secs = parse_var("COMMAND_TIMEOUT_SECS", &v)?;
    }
    if let Some(v) = get("REQUEST_TIMEOUT_SECS") {
        config.timeouts.request_secs = parse_var("REQUEST_TIMEOUT_SECS", &v)?;
    }

    if let Some(v) = get("LOG_LEVEL") {
        config.observability.log_level = v;
    }
    if let Some(v) = get("LOG_FORMAT") {
        config.observability.log_format = parse_var("LOG_FORMAT", &v)?;
    }
    if let Some(v) = get("METRICS_ENABLED") {
        config.observability.metrics_enabled = parse_var("METRICS_ENABLED", &v)?;
    }
    if let Some(v) = get("METRICS_ADDRESS") {
        config.observability.metrics_address = v;
    }

    Ok(config)
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Env {
        var,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::LogFormat;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_env_overrides_documented_variables() {
        let config = apply_env_overrides(
            GatewayConfig::default(),
            env(&[
                ("RPC_URL", "node.example:26657"),
                ("CHAIN_ID", "pulsar-3"),
                ("FAUCET_WALLET_NAME", "faucet"),
                ("FAUCET_AMOUNT", "5000"),
                ("LOG_FORMAT", "json"),
            ]),
        )
        .unwrap();

        assert_eq!(config.chain.rpc_url, "node.example:26657");
        assert_eq!(config.chain.chain_id, "pulsar-3");
        assert_eq!(config.chain.wallet_name, "faucet");
        assert_eq!(config.chain.faucet_amount, "5000");
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = apply_env_overrides(GatewayConfig::default(), env(&[("CHAIN_ID", "  ")])).unwrap();
        assert_eq!(config.chain.chain_id, "secretdev-1");
    }

    #[test]
    fn test_unparseable_env_value() {
        let err = apply_env_overrides(
            GatewayConfig::default(),
            env(&[("COMMAND_TIMEOUT_SECS", "soon")]),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Invalid COMMAND_TIMEOUT_SECS"));
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chain\nwallet_name = ").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_validates_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeouts]\ncommand_secs = 120\nrequest_secs = 60").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("timeouts.request_secs"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
