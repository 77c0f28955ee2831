//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)
//! - The sender key is resolved lazily by the first request that needs it

use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Start every subsystem and serve until shutdown.
pub async fn run(config: GatewayConfig, shutdown: &Shutdown) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        binary = %config.chain.binary,
        rpc_url = %config.chain.rpc_url,
        chain_id = %config.chain.chain_id,
        wallet = %config.chain.wallet_name,
        amount = %config.chain.faucet_amount,
        denom = %config.chain.denom,
        command_timeout_secs = config.timeouts.command_secs,
        cert_dir = %config.storage.cert_dir.display(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    Ok(())
}
