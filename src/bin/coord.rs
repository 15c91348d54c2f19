//! Coordinator binary

use clap::{Parser, Subcommand};
use minidfs::{CoordinatorConfig, CoordinatorServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "minidfs-coord")]
#[command(about = "minidfs coordinator: node registry and placement metadata")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start coordinator server
    Serve {
        /// Bind address for HTTP
        #[arg(long, default_value = "0.0.0.0:5000")]
        bind: String,

        /// Replication factor
        #[arg(long, default_value = "3")]
        replication: usize,

        /// Seconds without a heartbeat before a node is considered dead
        #[arg(long, default_value = "10")]
        heartbeat_timeout: u64,

        /// Seconds between reap passes over the registry
        #[arg(long, default_value = "5")]
        reap_interval: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            replication,
            heartbeat_timeout,
            reap_interval,
        } => {
            let config = CoordinatorConfig {
                bind_addr: bind.parse()?,
                replication_factor: replication,
                heartbeat_timeout_secs: heartbeat_timeout,
                reap_interval_secs: reap_interval,
            };
            CoordinatorServer::new(config).serve().await?;
        }
    }

    Ok(())
}
