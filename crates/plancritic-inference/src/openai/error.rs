//! Provider error classification.

use plancritic_core::Error;

/// Error classes reported by an OpenAI-compatible provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorCode {
    /// Invalid authentication credentials.
    AuthenticationError,
    /// Rate limit or quota exceeded.
    RateLimitExceeded,
    /// Model not found or not available.
    ModelNotFound,
    /// Request too large (image plus prompt over the context window).
    ContextLengthExceeded,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl ProviderErrorCode {
    /// Determine error code from HTTP status and error type.
    pub fn from_response(status: u16, error_type: &str) -> Self {
        match (status, error_type) {
            (401, _) => Self::AuthenticationError,
            (429, _) => Self::RateLimitExceeded,
            (404, _) | (_, "model_not_found") => Self::ModelNotFound,
            (400, _) if error_type.contains("context_length") => Self::ContextLengthExceeded,
            (500..=599, _) => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

/// Convert a classified provider error into a plancritic error.
///
/// Every class maps to `Error::Provider`; the relay never retries.
pub fn to_provider_error(code: ProviderErrorCode, message: &str) -> Error {
    let message = match code {
        ProviderErrorCode::AuthenticationError => format!("Authentication failed: {}", message),
        ProviderErrorCode::RateLimitExceeded => format!("Rate limit exceeded: {}", message),
        ProviderErrorCode::ModelNotFound => format!("Model not found: {}", message),
        ProviderErrorCode::ContextLengthExceeded => format!("Context too long: {}", message),
        ProviderErrorCode::ServerError => format!("Server error: {}", message),
        ProviderErrorCode::Unknown => message.to_string(),
    };
    Error::Provider(message)
}
