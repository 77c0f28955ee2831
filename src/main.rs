//! Secret Network transaction gateway.
//!
//! Serves a token faucet and node registration over HTTP by driving the
//! `secretd` command-line client.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ http::server ──▶ http::request (validate)
//!                                              │
//!                                              ▼
//!                                      gateway::service ──▶ gateway::transient
//!                                              │              (certificate file)
//!                                              ▼
//!                                      gateway::command ──▶ gateway::runner ──▶ secretd
//!                                                                  │
//!     Client Response                                              ▼
//!     ◀─────────────── http::response ◀── gateway::interpret ◀── stdout
//! ```
//!
//! # Routes
//! - `GET /faucet?address=<addr>` → `"<txhash>"`
//! - `GET /register?cert=<base64>` → `"<txhash>"`
//! - `GET /` and `GET /status` → faucet address and amount
//! - `GET /health`

use clap::Parser;
use std::path::PathBuf;

use secret_gateway::config::load_config;
use secret_gateway::lifecycle::{startup, Shutdown};
use secret_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "secret-gateway")]
#[command(about = "HTTP faucet and node registration gateway for secretd", long_about = None)]
struct Args {
    /// Optional TOML file; environment variables override its values.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("secret-gateway: {}", e);
            std::process::exit(2);
        }
    };

    logging::init(&config.observability);

    tracing::info!("secret-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    startup::run(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
