//! Utility functions for minidfs

use std::time::{SystemTime, UNIX_EPOCH};

/// Get current Unix timestamp (seconds)
pub fn timestamp_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

/// Get current Unix timestamp (milliseconds)
pub fn timestamp_now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];
    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}

/// Validate a node address (the URL a node advertises itself under)
pub fn validate_address(address: &str) -> crate::Result<()> {
    if address.is_empty() {
        return Err(crate::Error::BadRequest("address cannot be empty".into()));
    }

    if address.len() > 1024 {
        return Err(crate::Error::BadRequest(
            "address too long (max 1024 bytes)".into(),
        ));
    }

    if address.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(crate::Error::BadRequest(
            "address contains invalid characters".into(),
        ));
    }

    if !address.starts_with("http://") && !address.starts_with("https://") {
        return Err(crate::Error::BadRequest(format!(
            "address must be an http(s) URL: {}",
            address
        )));
    }

    Ok(())
}

/// Validate a file name
pub fn validate_file_name(name: &str) -> crate::Result<()> {
    if name.is_empty() {
        return Err(crate::Error::BadRequest("file name cannot be empty".into()));
    }

    if name.len() > 1024 {
        return Err(crate::Error::BadRequest(
            "file name too long (max 1024 bytes)".into(),
        ));
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(crate::Error::BadRequest(
            "file name contains invalid characters".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0.00 B");
        assert_eq!(format_bytes(1023), "1023.00 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.00 GB");
    }

    #[test]
    fn test_validate_address() {
        assert!(validate_address("http://localhost:5001").is_ok());
        assert!(validate_address("https://node-1.internal:6000").is_ok());
        assert!(validate_address("").is_err());
        assert!(validate_address("localhost:5001").is_err());
        assert!(validate_address("http://bad host").is_err());
        assert!(validate_address(&format!("http://{}", "x".repeat(2000))).is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("report.txt").is_ok());
        assert!(validate_file_name("path/to/file.bin").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("bad\nname").is_err());
        assert!(validate_file_name(&"x".repeat(2000)).is_err());
    }

    #[test]
    fn test_timestamps_monotonic() {
        let a = timestamp_now_millis();
        let b = timestamp_now_millis();
        assert!(b >= a);
    }
}
