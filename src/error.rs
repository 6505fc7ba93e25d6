//! Error types for Dhraviq
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Dhraviq operations
///
/// This enum covers configuration loading, the remote agent service,
/// identity lookups, the local progress store and credential storage.
#[derive(Error, Debug)]
pub enum DhraviqError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote agent service errors (unreachable, non-success status)
    #[error("Service error: {0}")]
    Service(String),

    /// The service answered with a body that does not have the expected shape
    #[error("Invalid response format from server: {0}")]
    Payload(String),

    /// A turn did not complete within the configured ceiling
    #[error("Request timed out after {seconds}s")]
    Timeout {
        /// The configured ceiling in seconds
        seconds: u64,
    },

    /// The in-flight request was abandoned by the caller
    #[error("Request cancelled")]
    Cancelled,

    /// Identity provider errors (profile lookup, token retrieval)
    #[error("Identity error: {0}")]
    Identity(String),

    /// Progress store errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for Dhraviq operations
///
/// Uses `anyhow::Error` so callers can attach context while the
/// underlying `DhraviqError` stays downcastable.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = DhraviqError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_service_error_display() {
        let error = DhraviqError::Service("HTTP error! status: 500".to_string());
        assert_eq!(error.to_string(), "Service error: HTTP error! status: 500");
    }

    #[test]
    fn test_payload_error_display() {
        let error = DhraviqError::Payload("missing `responses`".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid response format from server: missing `responses`"
        );
    }

    #[test]
    fn test_timeout_error_display() {
        let error = DhraviqError::Timeout { seconds: 120 };
        assert_eq!(error.to_string(), "Request timed out after 120s");
    }

    #[test]
    fn test_cancelled_error_display() {
        assert_eq!(DhraviqError::Cancelled.to_string(), "Request cancelled");
    }

    #[test]
    fn test_identity_error_display() {
        let error = DhraviqError::Identity("no profile".to_string());
        assert_eq!(error.to_string(), "Identity error: no profile");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: DhraviqError = io_error.into();
        assert!(matches!(error, DhraviqError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: DhraviqError = json_error.into();
        assert!(matches!(error, DhraviqError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: DhraviqError = yaml_error.into();
        assert!(matches!(error, DhraviqError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DhraviqError>();
    }

    #[test]
    fn test_storage_error_display() {
        let error = DhraviqError::Storage("database connection failed".to_string());
        assert_eq!(
            error.to_string(),
            "Storage error: database connection failed"
        );
    }
}
