//! OpenAI-compatible vision backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use plancritic_core::{defaults, Error, Result};

use super::error::{to_provider_error, ProviderErrorCode};
use super::types::*;
use crate::vision::{VisionBackend, VisionRequest};

/// Configuration for the OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local endpoints).
    pub api_key: Option<String>,
    /// Multimodal model used for plan analysis.
    pub vision_model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::OPENAI_URL.to_string(),
            api_key: None,
            vision_model: defaults::VISION_MODEL.to_string(),
            timeout_seconds: defaults::PROVIDER_TIMEOUT_SECS,
        }
    }
}

impl OpenAIConfig {
    /// Read configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var(defaults::ENV_OPENAI_BASE_URL)
                .unwrap_or_else(|_| defaults::OPENAI_URL.to_string()),
            api_key: std::env::var(defaults::ENV_OPENAI_API_KEY)
                .ok()
                .filter(|k| !k.is_empty()),
            vision_model: std::env::var(defaults::ENV_OPENAI_VISION_MODEL)
                .unwrap_or_else(|_| defaults::VISION_MODEL.to_string()),
            timeout_seconds: std::env::var(defaults::ENV_OPENAI_TIMEOUT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::PROVIDER_TIMEOUT_SECS),
        }
    }
}

/// OpenAI-compatible vision backend.
pub struct OpenAIVisionBackend {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIVisionBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            warn!("OPENAI_API_KEY is not set; provider calls will be unauthenticated");
        }

        info!(
            base_url = %config.base_url,
            model = %config.vision_model,
            "Initializing OpenAI vision backend"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key {
            Some(ref api_key) => req.header("Authorization", format!("Bearer {}", api_key)),
            None => req,
        }
    }

    fn build_completion(&self, request: &VisionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.vision_model.clone(),
            messages: vec![
                ChatMessage::system(request.system.clone()),
                ChatMessage::user(vec![
                    ContentPart::Text {
                        text: request.user.clone(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: request.image_data_uri.clone(),
                        },
                    },
                ]),
            ],
            max_tokens: Some(request.sampling.max_tokens),
            temperature: Some(request.sampling.temperature),
            presence_penalty: Some(request.sampling.presence_penalty),
            frequency_penalty: Some(request.sampling.frequency_penalty),
            stream: false,
        }
    }
}

#[async_trait]
impl VisionBackend for OpenAIVisionBackend {
    async fn complete(&self, request: &VisionRequest) -> Result<String> {
        debug!(
            model = %self.config.vision_model,
            prompt_len = request.user.len(),
            image_uri_len = request.image_data_uri.len(),
            "Requesting vision completion"
        );
        let started = Instant::now();

        let body = self.build_completion(request);
        let response = self
            .authorize(self.client.post(self.url("/chat/completions")))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body: OpenAIErrorResponse = response.json().await.unwrap_or(OpenAIErrorResponse {
                error: OpenAIError {
                    message: format!("Provider returned {}", status),
                    error_type: "unknown".to_string(),
                    code: None,
                },
            });
            let code = ProviderErrorCode::from_response(
                status.as_u16(),
                body.error.code.as_deref().unwrap_or(&body.error.error_type),
            );
            return Err(to_provider_error(code, &body.error.message));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse response: {}", e)))?;

        let content = result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        debug!(
            response_len = content.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            total_tokens = result.usage.as_ref().map(|u| u.total_tokens),
            "Vision completion finished"
        );
        Ok(content)
    }

    async fn health_check(&self) -> Result<bool> {
        let response = self
            .authorize(self.client.get(self.url("/models")))
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => Ok(true),
            Ok(resp) => {
                warn!("OpenAI health check failed: {}", resp.status());
                Ok(false)
            }
            Err(e) => {
                warn!("OpenAI health check error: {}", e);
                Ok(false)
            }
        }
    }

    fn model_name(&self) -> &str {
        &self.config.vision_model
    }
}
