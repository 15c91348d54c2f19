//! Storage node binary

use anyhow::Result;
use clap::Parser;
use minidfs::{StorageNodeConfig, StorageNodeServer};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "minidfs-node")]
#[command(about = "minidfs storage node: durable block storage")]
#[command(version)]
struct Args {
    /// Node ID (unique identifier for this node)
    #[arg(short, long, default_value = "node-1")]
    id: String,

    /// Bind address for HTTP
    #[arg(short, long, default_value = "0.0.0.0:5001")]
    bind: String,

    /// URL other processes use to reach this node
    #[arg(long, default_value = "http://localhost:5001")]
    advertise: String,

    /// Coordinator base URL
    #[arg(short, long, default_value = "http://localhost:5000")]
    coordinator: String,

    /// Data directory for blocks
    #[arg(short, long, default_value = "./data-node")]
    data: PathBuf,

    /// Seconds between heartbeats to the coordinator
    #[arg(long, default_value = "5")]
    heartbeat_interval: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorageNodeConfig {
        bind_addr: args.bind.parse()?,
        advertise_url: args.advertise,
        coordinator_url: args.coordinator,
        data_dir: args.data,
        heartbeat_interval_secs: args.heartbeat_interval,
    };

    StorageNodeServer::new(config, args.id).serve().await?;

    Ok(())
}
