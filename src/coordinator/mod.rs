//! Coordinator implementation
//!
//! The coordinator is responsible for:
//! - Tracking which storage nodes are alive (heartbeat registry)
//! - Placement decisions for new blocks (replica selection)
//! - The authoritative file → blocks → replicas mapping
//!
//! It never participates in the data path; clients push and pull bytes
//! directly against storage nodes.

pub mod core;
pub mod http;
pub mod metadata;
pub mod placement;
pub mod registry;
pub mod server;

pub use self::core::Coordinator;
pub use metadata::{BlockDescriptor, BlockId, MetadataStore};
pub use placement::{BlockPlacer, FirstAvailable, PlacementStrategy};
pub use registry::NodeRegistry;
pub use server::CoordinatorServer;
