//! Error types for plancritic.

use thiserror::Error;

/// Result type alias using plancritic's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for plancritic operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input (missing upload, non-file part, incomplete form)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// External model provider failed (auth, network, timeout, bad reply)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A submission is already in flight
    #[error("Busy: {0}")]
    Busy(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// The failure's own message, without the variant label.
    pub fn message(&self) -> &str {
        match self {
            Error::InvalidInput(m)
            | Error::Provider(m)
            | Error::Config(m)
            | Error::Request(m)
            | Error::Serialization(m)
            | Error::Busy(m)
            | Error::Internal(m) => m,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_omits_variant_label() {
        let err = Error::Provider("Authentication failed: bad key".to_string());
        assert_eq!(err.message(), "Authentication failed: bad key");
        assert_eq!(err.to_string(), "Provider error: Authentication failed: bad key");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("file missing".to_string());
        assert_eq!(err.to_string(), "Invalid input: file missing");
    }

    #[test]
    fn test_error_display_provider() {
        let err = Error::Provider("timeout".to_string());
        assert_eq!(err.to_string(), "Provider error: timeout");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }

    #[test]
    fn test_error_display_busy() {
        let err = Error::Busy("analysis in progress".to_string());
        assert_eq!(err.to_string(), "Busy: analysis in progress");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
