//! Error types for minidfs

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Caller Errors ===
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Block not found: {0}")]
    BlockNotFound(String),

    // === Placement Errors ===
    #[error("No storage nodes available")]
    NoNodesAvailable,

    // === Network Errors ===
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    // === Generic ===
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Is this a retryable error?
    ///
    /// `NoNodesAvailable` is transient: once nodes report liveness again the
    /// same request can succeed. Caller errors and misses never are.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::NoNodesAvailable | Error::ConnectionFailed(_) | Error::Http(_)
        )
    }

    /// Convert to HTTP status code
    pub fn to_http_status(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::FileNotFound(_) | Error::BlockNotFound(_) => StatusCode::NOT_FOUND,
            Error::NoNodesAvailable => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.to_http_status();
        let body = axum::Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

// Implement From for common error types
impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            Error::ConnectionFailed(e.to_string())
        } else {
            Error::Http(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(
            Error::BadRequest("x".into()).to_http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::FileNotFound("f".into()).to_http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::NoNodesAvailable.to_http_status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            Error::Internal("x".into()).to_http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_retryable() {
        assert!(Error::NoNodesAvailable.is_retryable());
        assert!(!Error::BadRequest("x".into()).is_retryable());
        assert!(!Error::FileNotFound("f".into()).is_retryable());
    }
}
