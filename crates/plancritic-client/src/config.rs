//! Client configuration.

use std::time::Duration;

use plancritic_core::defaults;

/// Environment variable naming the relay base URL.
pub const ENV_API_URL: &str = "PLANCRITIC_API_URL";

/// Environment variable for the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "PLANCRITIC_TIMEOUT";

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Relay origin, without the analyze path.
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: defaults::CLIENT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var(ENV_API_URL)
            .ok()
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_seconds = std::env::var(ENV_TIMEOUT)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults::CLIENT_TIMEOUT_SECS);

        Self {
            base_url,
            timeout_seconds,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Full URL of the analyze endpoint.
    pub fn analyze_url(&self) -> String {
        format!("{}{}", self.base_url, defaults::ANALYZE_PATH)
    }
}
