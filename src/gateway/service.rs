//! The transaction-submission gateway.
//!
//! # Responsibilities
//! - Resolve the faucet sender address (once per process)
//! - Build the command for a submission and run it
//! - Hand stdout to the interpreter and report the hash or the failure
//! - Own the transient certificate file for the length of a registration

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OnceCell;

use crate::config::{ChainConfig, GatewayConfig};
use crate::gateway::command::{self, CommandSpec};
use crate::gateway::interpret::interpret;
use crate::gateway::keys::find_address;
use crate::gateway::runner::{CommandRunner, ProcessOutput, ProcessRunner};
use crate::gateway::transient::TransientFile;
use crate::gateway::types::{GatewayError, GatewayResult, SubmissionKind, TxHash};
use crate::observability::metrics;

/// A validated request for one transaction.
#[derive(Debug, Clone, Copy)]
pub enum Submission<'a> {
    /// Send the configured amount to `destination`.
    Faucet { destination: &'a str },
    /// Register a node with a decoded attestation certificate.
    Register { certificate: &'a [u8] },
}

impl Submission<'_> {
    pub fn kind(&self) -> SubmissionKind {
        match self {
            Submission::Faucet { .. } => SubmissionKind::Faucet,
            Submission::Register { .. } => SubmissionKind::Register,
        }
    }
}

/// Gateway to the chain client binary.
pub struct Gateway {
    chain: ChainConfig,
    cert_dir: PathBuf,
    runner: Arc<dyn CommandRunner>,
    /// Sender address; keys do not change while running.
    sender_address: OnceCell<String>,
}

impl Gateway {
    /// Create a gateway that runs the configured binary as a child process.
    pub fn new(config: &GatewayConfig) -> Self {
        let runner = ProcessRunner::new(config.timeouts.command());
        Self::with_runner(config, Arc::new(runner))
    }

    /// Create a gateway with a custom runner.
    pub fn with_runner(config: &GatewayConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            chain: config.chain.clone(),
            cert_dir: config.storage.cert_dir.clone(),
            runner,
            sender_address: OnceCell::new(),
        }
    }

    pub fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    /// Address of the configured wallet key.
    ///
    /// The first successful lookup is cached; failures are not, so a key
    /// added later is picked up by the next request.
    pub async fn get_address(&self) -> GatewayResult<String> {
        self.sender_address
            .get_or_try_init(|| async {
                let output = self.execute(&command::list_keys(&self.chain)).await?;
                let address = find_address(&output.stdout, &self.chain.wallet_name)?;
                tracing::info!(
                    wallet = %self.chain.wallet_name,
                    address = %address,
                    "Found key with address"
                );
                Ok::<_, GatewayError>(address)
            })
            .await
            .cloned()
    }

    /// Submit one transaction and return its hash.
    pub async fn submit(&self, submission: Submission<'_>) -> GatewayResult<TxHash> {
        let kind = submission.kind();
        let start = Instant::now();

        let result = match submission {
            Submission::Faucet { destination } => self.send_tokens(destination).await,
            Submission::Register { certificate } => self.register(certificate).await,
        };

        match &result {
            Ok(hash) => {
                tracing::info!(kind = %kind, txhash = %hash, "Transaction submitted");
                metrics::record_submission(kind, "success", start);
            }
            Err(e) => metrics::record_submission(kind, e.kind(), start),
        }

        result
    }

    async fn send_tokens(&self, destination: &str) -> GatewayResult<TxHash> {
        let sender = self.get_address().await?;
        let spec = command::bank_send(&self.chain, &sender, destination);
        let output = self.execute(&spec).await?;
        interpret(&output.stdout)
    }

    async fn register(&self, certificate: &[u8]) -> GatewayResult<TxHash> {
        let cert_file = TransientFile::write(&self.cert_dir, certificate)
            .await
            .map_err(GatewayError::TransientFile)?;

        let spec = command::register_auth(&self.chain, cert_file.path());
        let output = self.execute(&spec).await?;
        interpret(&output.stdout)
        // cert_file dropped here, or on any earlier return.
    }

    async fn execute(&self, spec: &CommandSpec) -> GatewayResult<ProcessOutput> {
        tracing::info!(command = %spec.display(), "Invoking client");
        Ok(self.runner.run(spec).await?)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("binary", &self.chain.binary)
            .field("chain_id", &self.chain.chain_id)
            .field("wallet", &self.chain.wallet_name)
            .field("cert_dir", &self.cert_dir)
            .finish()
    }
}
