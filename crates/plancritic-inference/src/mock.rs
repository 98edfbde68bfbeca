//! Mock vision backend for deterministic testing.
//!
//! ```rust,ignore
//! use plancritic_inference::mock::MockVisionBackend;
//!
//! let backend = MockVisionBackend::new().with_fixed_response("Test response");
//! assert_eq!(backend.call_count(), 0);
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use plancritic_core::{Error, Result};

use crate::vision::{VisionBackend, VisionRequest};

/// Mock vision backend that replays a canned reply and logs every call.
#[derive(Clone)]
pub struct MockVisionBackend {
    response: std::result::Result<String, String>,
    latency_ms: u64,
    call_log: Arc<Mutex<Vec<VisionRequest>>>,
}

impl Default for MockVisionBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockVisionBackend {
    pub fn new() -> Self {
        Self {
            response: Ok("Mock response".to_string()),
            latency_ms: 0,
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply with this text on every call.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        self.response = Ok(response.into());
        self
    }

    /// Fail every call with `Error::Provider(message)`.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.response = Err(message.into());
        self
    }

    /// Delay each reply.
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// All requests received so far.
    pub fn calls(&self) -> Vec<VisionRequest> {
        self.call_log.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

#[async_trait]
impl VisionBackend for MockVisionBackend {
    async fn complete(&self, request: &VisionRequest) -> Result<String> {
        self.call_log.lock().unwrap().push(request.clone());
        if self.latency_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.latency_ms)).await;
        }
        self.response.clone().map_err(Error::Provider)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(self.response.is_ok())
    }

    fn model_name(&self) -> &str {
        "mock-vision"
    }
}
