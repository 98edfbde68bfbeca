//! Vision backend trait for multimodal chat completions.

use async_trait::async_trait;
use plancritic_core::{defaults, Result};

/// Fixed sampling parameters for one completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_tokens: defaults::MAX_TOKENS,
            temperature: defaults::TEMPERATURE,
            presence_penalty: defaults::PRESENCE_PENALTY,
            frequency_penalty: defaults::FREQUENCY_PENALTY,
        }
    }
}

/// A system instruction plus a user instruction with one attached image.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub system: String,
    pub user: String,
    /// `data:<mime>;base64,<payload>`
    pub image_data_uri: String,
    pub sampling: SamplingParams,
}

/// Backend answering one multimodal prompt with one text completion.
///
/// Implementations make exactly one call per invocation: no retries, no
/// streaming, no caching.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Run a single completion and return the raw reply text.
    async fn complete(&self, request: &VisionRequest) -> Result<String>;

    /// Check if the backend is reachable.
    async fn health_check(&self) -> Result<bool>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_defaults() {
        let s = SamplingParams::default();
        assert_eq!(s.max_tokens, 3000);
        assert_eq!(s.temperature, 0.6);
        assert_eq!(s.presence_penalty, 0.7);
        assert_eq!(s.frequency_penalty, 0.7);
    }
}
