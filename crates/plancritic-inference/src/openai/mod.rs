//! OpenAI-compatible vision backend.
//!
//! Works with any endpoint that accepts chat completions with `image_url`
//! content parts (OpenAI, Azure OpenAI, OpenRouter, vLLM, LM Studio).
//!
//! # Example
//!
//! ```rust,no_run
//! use plancritic_inference::openai::{OpenAIConfig, OpenAIVisionBackend};
//! use plancritic_inference::VisionBackend;
//!
//! let backend = OpenAIVisionBackend::new(OpenAIConfig {
//!     base_url: "http://localhost:11434/v1".to_string(),
//!     api_key: None,
//!     vision_model: "llava".to_string(),
//!     timeout_seconds: 120,
//! })
//! .unwrap();
//! assert_eq!(backend.model_name(), "llava");
//! ```

mod backend;
mod error;
mod types;

pub use backend::{OpenAIConfig, OpenAIVisionBackend};
pub use error::{to_provider_error, ProviderErrorCode};
pub use types::*;
