//! CLI client for minidfs

use clap::{Parser, Subcommand};
use minidfs::common::format_bytes;
use minidfs::DfsClient;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minidfs")]
#[command(about = "minidfs distributed file store CLI")]
#[command(version)]
struct Cli {
    /// Coordinator URL
    #[arg(long, default_value = "http://localhost:5000")]
    coordinator: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file
    Put {
        /// Local file path
        file: PathBuf,

        /// Name to store under (defaults to the file name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Download a file
    Get {
        /// Stored file name
        name: String,

        /// Output file path
        output: PathBuf,
    },

    /// List stored files
    Ls,

    /// List live storage nodes
    Nodes,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let client = DfsClient::new(cli.coordinator);

    match cli.command {
        Commands::Put { file, name } => {
            let name = match name {
                Some(n) => n,
                None => file
                    .file_name()
                    .and_then(|n| n.to_str())
                    .ok_or_else(|| anyhow::anyhow!("cannot derive a name from {:?}", file))?
                    .to_string(),
            };
            let data = tokio::fs::read(&file).await?;
            let alloc = client.upload(&name, &data).await?;
            println!(
                "Uploaded {} ({}) as block {} to {} replica(s)",
                name,
                format_bytes(data.len() as u64),
                alloc.block_id,
                alloc.replicas.len()
            );
        }

        Commands::Get { name, output } => {
            let data = client.download(&name).await?;
            tokio::fs::write(&output, &data).await?;
            println!(
                "Downloaded {} ({}) to {}",
                name,
                format_bytes(data.len() as u64),
                output.display()
            );
        }

        Commands::Ls => {
            for name in client.list_files().await? {
                println!("{}", name);
            }
        }

        Commands::Nodes => {
            for addr in client.list_nodes().await? {
                println!("{}", addr);
            }
        }
    }

    Ok(())
}
