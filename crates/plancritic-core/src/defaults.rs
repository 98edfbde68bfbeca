//! Centralized default constants for plancritic.
//!
//! Shared by the relay server and the upload client so both sides agree on
//! field names, fallbacks and sampling parameters.

// =============================================================================
// HTTP SURFACE
// =============================================================================

/// Path of the analysis endpoint.
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Multipart field carrying the plan image.
pub const FIELD_FILE: &str = "file";

/// Multipart field carrying the project city.
pub const FIELD_CITY: &str = "city";

/// Multipart field carrying the building orientation.
pub const FIELD_ORIENTATION: &str = "orientation";

/// Default bind port.
pub const SERVER_PORT: u16 = 3000;

/// Default upper bound for an upload body (20 MiB).
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

// =============================================================================
// RELAY FALLBACKS
// =============================================================================

/// City used by the relay when the form omits one.
pub const RELAY_CITY: &str = "تهران";

/// Orientation used by the relay when the form omits one.
pub const RELAY_ORIENTATION: &str = "unknown";

/// MIME type for the image data URI when nothing better is known.
pub const IMAGE_MIME: &str = "image/png";

/// User-facing message when the upload has no file part.
pub const MISSING_FILE_MESSAGE: &str = "فایل ارسال نشده است.";

// =============================================================================
// PROVIDER
// =============================================================================

/// Default OpenAI-compatible endpoint.
pub const OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default multimodal model.
pub const VISION_MODEL: &str = "chatgpt-4o-latest";

/// Provider request timeout in seconds.
pub const PROVIDER_TIMEOUT_SECS: u64 = 300;

/// Completion length bound.
pub const MAX_TOKENS: u32 = 3000;

/// Sampling temperature.
pub const TEMPERATURE: f32 = 0.6;

/// Presence penalty.
pub const PRESENCE_PENALTY: f32 = 0.7;

/// Frequency penalty.
pub const FREQUENCY_PENALTY: f32 = 0.7;

// =============================================================================
// ENVIRONMENT VARIABLE NAMES
// =============================================================================

pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_OPENAI_VISION_MODEL: &str = "OPENAI_VISION_MODEL";
pub const ENV_OPENAI_TIMEOUT: &str = "OPENAI_TIMEOUT";

// =============================================================================
// UPLOAD CLIENT
// =============================================================================

/// City preselected in a fresh or reset form.
pub const CLIENT_CITY: &str = "اردبیل";

/// Prefix for failures rendered inline in place of the critique.
pub const REQUEST_ERROR_PREFIX: &str = "خطا در درخواست: ";

/// Interval between status caption changes while loading.
pub const CAPTION_INTERVAL_MS: u64 = 1500;

/// Status captions cycled while an analysis is in flight.
pub const LOADING_CAPTIONS: &[&str] = &[
    "در حال بررسی نقشه",
    "در حال بررسی نقشه",
    "پردازش اطلاعات",
    "بررسی مطابقت با قوانین",
    "استاندارد",
    "اصول طراحی معماری",
    "تحلیل فنی",
    "تحلیل اقلیمی",
];

/// Client request timeout in seconds.
pub const CLIENT_TIMEOUT_SECS: u64 = 330;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captions_not_empty() {
        assert_eq!(LOADING_CAPTIONS.len(), 8);
        assert!(LOADING_CAPTIONS.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_client_outlasts_provider_timeout() {
        assert!(CLIENT_TIMEOUT_SECS > PROVIDER_TIMEOUT_SECS);
    }
}
