//! FlatKV Server Binary
//!
//! Starts the HTTP server for FlatKV.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use flatkv::{Config, Server, Store};
use tracing_subscriber::{fmt, EnvFilter};

/// FlatKV Server
#[derive(Parser, Debug)]
#[command(name = "flatkv-server")]
#[command(about = "Key-value store over HTTP, one file per key")]
#[command(version)]
struct Args {
    /// Store root directory (created if absent)
    #[arg(short, long, env = "FLATKV_DATA_DIR", default_value = "./db")]
    data_dir: PathBuf,

    /// Listen address (host:port)
    #[arg(short, long, env = "FLATKV_LISTEN", default_value = "127.0.0.1:3000")]
    listen: String,

    /// Log every request under the `audit` target
    #[arg(short, long, env = "FLATKV_AUDIT")]
    audit: bool,

    /// Serialize concurrent writes to the same key
    #[arg(long, env = "FLATKV_SERIALIZE_WRITES")]
    serialize_writes: bool,

    /// Keep directory order in listings instead of sorting
    #[arg(long)]
    unsorted: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,flatkv=debug,audit=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("FlatKV Server v{}", flatkv::VERSION);
    tracing::info!("Store root: {}", args.data_dir.display());
    tracing::info!("Listen address: {}", args.listen);

    // Build config from args
    let config = Config::builder()
        .data_dir(&args.data_dir)
        .listen_addr(&args.listen)
        .audit(args.audit)
        .serialize_writes(args.serialize_writes)
        .sort_listings(!args.unsorted)
        .build();

    // Open store (creates the root)
    let store = match Store::open(&config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    let server = Server::new(config, store);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
