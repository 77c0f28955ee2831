//! Typed command lines for the chain client binary.
//!
//! # Responsibilities
//! - Assemble argument vectors in the exact order the client expects
//! - Keep every dynamic value a single argument (no shell, no splitting)
//!
//! Each builder takes the immutable [`ChainConfig`] plus exactly one value
//! that came from the request.

use std::ffi::OsString;
use std::path::Path;

use crate::config::ChainConfig;

/// Program plus ordered arguments, executed without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<OsString>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Space-joined rendering for logs. Not suitable for execution.
    pub fn display(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            out.push_str(&arg.to_string_lossy());
        }
        out
    }
}

/// `keys list --output json`
pub fn list_keys(chain: &ChainConfig) -> CommandSpec {
    CommandSpec::new(&chain.binary).args(["keys", "list", "--output", "json"])
}

/// `tx bank send <sender> <dest> <amount><denom> --from <wallet> --gas-prices <price> -y`
pub fn bank_send(chain: &ChainConfig, sender: &str, destination: &str) -> CommandSpec {
    CommandSpec::new(&chain.binary)
        .args(["tx", "bank", "send"])
        .arg(sender)
        .arg(destination)
        .arg(format!("{}{}", chain.faucet_amount, chain.denom))
        .args(["--from", chain.wallet_name.as_str()])
        .args(["--gas-prices", chain.gas_prices.as_str()])
        .arg("-y")
}

/// `tx register auth <cert> --node tcp://<rpc> -y --from <wallet> --gas <gas> --gas-prices <price> --chain-id <id>`
pub fn register_auth(chain: &ChainConfig, cert_path: &Path) -> CommandSpec {
    CommandSpec::new(&chain.binary)
        .args(["tx", "register", "auth"])
        .arg(cert_path.as_os_str())
        .args(["--node".to_string(), format!("tcp://{}", chain.rpc_url)])
        .arg("-y")
        .args(["--from", chain.wallet_name.as_str()])
        .args(["--gas".to_string(), chain.register_gas.to_string()])
        .args(["--gas-prices", chain.gas_prices.as_str()])
        .args(["--chain-id", chain.chain_id.as_str()])
}
