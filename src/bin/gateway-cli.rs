use base64::Engine;
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Client for a running secret-gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the faucet address and amount
    Status,
    /// Request tokens for an address
    Faucet {
        /// Destination address
        address: String,
    },
    /// Register a node with an attestation certificate file
    Register {
        /// Path to the certificate (raw bytes, base64-encoded before sending)
        cert: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let request = match cli.command {
        Commands::Status => client.get(format!("{}/status", cli.url)),
        Commands::Faucet { address } => client
            .get(format!("{}/faucet", cli.url))
            .query(&[("address", address)]),
        Commands::Register { cert } => {
            let bytes = std::fs::read(&cert)?;
            let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
            client
                .get(format!("{}/register", cli.url))
                .query(&[("cert", encoded)])
        }
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: gateway returned status {}", status);
        if let Ok(text) = res.text().await {
            if !text.is_empty() {
                eprintln!("Response: {}", text);
            }
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    match json {
        Value::String(txhash) => println!("{}", txhash),
        other => println!("{}", serde_json::to_string_pretty(&other)?),
    }
    Ok(())
}
