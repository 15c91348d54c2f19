//! Storage node implementation
//!
//! A storage node durably persists raw blocks keyed by block id and
//! announces itself to the coordinator with periodic heartbeats. It knows
//! nothing about files or placement.

pub mod http;
pub mod server;
pub mod store;

pub use server::StorageNodeServer;
pub use store::BlockStore;
