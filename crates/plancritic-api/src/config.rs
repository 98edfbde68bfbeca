//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3000` |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000` |
//! | `MAX_UPLOAD_BYTES` | 20 MiB |
//! | `LOG_FORMAT` | `text` (`json` for structured output) |
//! | `LOG_FILE` | unset (stdout) |
//! | `LOG_ANSI` | auto |
//!
//! Provider settings (`OPENAI_*`) are read by [`OpenAIConfig::from_env`].

use axum::http::HeaderValue;
use plancritic_core::defaults;
use plancritic_inference::OpenAIConfig;

const DEFAULT_ORIGIN: &str = "http://localhost:3000";

/// Logging output settings.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// "json" or "text".
    pub format: String,
    /// Path of a daily-rolled log file; stdout when unset.
    pub file: Option<String>,
    /// Force ANSI colors on or off.
    pub ansi: Option<bool>,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self {
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
            file: std::env::var("LOG_FILE").ok(),
            ansi: std::env::var("LOG_ANSI")
                .ok()
                .map(|v| v == "true" || v == "1"),
        }
    }
}

/// Everything the server binary needs at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<HeaderValue>,
    pub max_upload_bytes: usize,
    pub openai: OpenAIConfig,
    pub log: LogConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: defaults::SERVER_PORT,
            allowed_origins: parse_allowed_origins(""),
            max_upload_bytes: defaults::MAX_UPLOAD_BYTES,
            openai: OpenAIConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults::SERVER_PORT),
            allowed_origins: parse_allowed_origins(
                &std::env::var("ALLOWED_ORIGINS").unwrap_or_default(),
            ),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults::MAX_UPLOAD_BYTES),
            openai: OpenAIConfig::from_env(),
            log: LogConfig::from_env(),
        }
    }
}

/// Parse a comma-separated CORS origin whitelist.
///
/// Invalid entries are skipped with a warning; an empty list falls back to
/// the local development origin.
pub fn parse_allowed_origins(origins_str: &str) -> Vec<HeaderValue> {
    let origins: Vec<HeaderValue> = origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                tracing::warn!("Invalid CORS origin '{}': missing scheme", trimmed);
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    if origins.is_empty() {
        return vec![HeaderValue::from_static(DEFAULT_ORIGIN)];
    }
    origins
}
