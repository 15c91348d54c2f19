//! # minidfs
//!
//! A minimal distributed file store:
//! - A coordinator tracking node liveness and block placement metadata
//! - Storage nodes persisting raw blocks keyed by opaque ids
//! - A client orchestrating uploads and downloads
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │            Coordinator               │
//! │  node registry · placement · files   │
//! └──────▲───────────────────▲───────────┘
//!        │ heartbeats        │ allocate / resolve
//!   ┌────┴─────┐         ┌───┴────┐
//!   │ Node 1..N │◄───────│ Client │
//!   │  blocks   │  bytes └────────┘
//!   └───────────┘
//! ```
//!
//! The coordinator never touches the data path: clients push bytes to each
//! replica and pull from the first replica that answers.
//!
//! ## Usage
//!
//! ### Start the coordinator
//! ```bash
//! minidfs-coord serve --bind 0.0.0.0:5000 --replication 3
//! ```
//!
//! ### Start a storage node
//! ```bash
//! minidfs-node serve \
//!   --id node-1 \
//!   --bind 0.0.0.0:5001 \
//!   --advertise http://localhost:5001 \
//!   --coordinator http://localhost:5000 \
//!   --data ./data-5001
//! ```
//!
//! ### Use the CLI
//! ```bash
//! minidfs put ./report.txt
//! minidfs get report.txt ./out.txt
//! minidfs ls
//! minidfs nodes
//! ```

pub mod client;
pub mod common;
pub mod coordinator;
pub mod node;

// Re-export commonly used types
pub use client::DfsClient;
pub use common::{CoordinatorConfig, Error, Result, StorageNodeConfig};
pub use coordinator::{BlockDescriptor, BlockId, Coordinator, CoordinatorServer};
pub use node::StorageNodeServer;

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
