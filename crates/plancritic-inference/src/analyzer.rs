//! Plan analysis relay: one uploaded plan in, one parsed critique out.

use std::sync::Arc;
use std::time::Instant;

use base64::Engine;
use tracing::{info, instrument};

use plancritic_core::{defaults, extract_scores, AnalysisRequest, AnalysisResponse, Result};

use crate::prompt::{user_instruction, SYSTEM_INSTRUCTION};
use crate::vision::{SamplingParams, VisionBackend, VisionRequest};

/// Turns an [`AnalysisRequest`] into exactly one model call and parses the
/// reply. Holds no per-request state, so one instance serves all requests.
#[derive(Clone)]
pub struct PlanAnalyzer {
    backend: Arc<dyn VisionBackend>,
    sampling: SamplingParams,
}

impl PlanAnalyzer {
    pub fn new(backend: Arc<dyn VisionBackend>) -> Self {
        Self {
            backend,
            sampling: SamplingParams::default(),
        }
    }

    pub fn backend(&self) -> &Arc<dyn VisionBackend> {
        &self.backend
    }

    /// Assemble the prompt for one request.
    pub fn build_request(&self, request: &AnalysisRequest) -> VisionRequest {
        VisionRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            user: user_instruction(&request.city, &request.orientation),
            image_data_uri: to_data_uri(&request.image_bytes, &request.mime_type),
            sampling: self.sampling,
        }
    }

    /// Run the analysis. Provider failures propagate unchanged; a reply
    /// without a recognizable score line is a successful result with
    /// `scores: None`.
    #[instrument(skip(self, request), fields(city = %request.city, orientation = %request.orientation, image_bytes = request.image_bytes.len()))]
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        let started = Instant::now();
        let vision_request = self.build_request(request);

        let reply = self.backend.complete(&vision_request).await?;
        let result = extract_scores(reply.trim());

        info!(
            model = self.backend.model_name(),
            response_len = reply.len(),
            scores_parsed = result.scores.is_some(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Plan analysis complete"
        );
        Ok(result)
    }
}

/// Encode bytes as a base64 `data:` URI.
pub fn to_data_uri(bytes: &[u8], mime_type: &str) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// Pick the MIME type for an uploaded image.
///
/// A declared `image/*` type wins, then magic-byte detection, then PNG.
pub fn detect_image_mime(declared: Option<&str>, bytes: &[u8]) -> String {
    if let Some(mime) = declared.filter(|m| m.starts_with("image/")) {
        return mime.to_string();
    }
    infer::get(bytes)
        .map(|kind| kind.mime_type())
        .filter(|m| m.starts_with("image/"))
        .unwrap_or(defaults::IMAGE_MIME)
        .to_string()
}
