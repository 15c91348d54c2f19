//! Common utilities and types shared across minidfs

pub mod config;
pub mod error;
pub mod utils;

pub use config::{CoordinatorConfig, StorageNodeConfig};
pub use error::{Error, Result};
pub use utils::{
    format_bytes, timestamp_now, timestamp_now_millis, validate_address, validate_file_name,
};
