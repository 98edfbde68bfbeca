//! # plancritic-inference
//!
//! Multimodal model access for plancritic.
//!
//! This crate provides:
//! - The [`VisionBackend`] trait (one prompt plus one image in, one text out)
//! - An OpenAI-compatible implementation
//! - The fixed critique prompt
//! - [`PlanAnalyzer`], which encodes the upload, calls the backend once and
//!   extracts the score line
//!
//! # Feature Flags
//!
//! - `mock`: expose [`mock::MockVisionBackend`] to dependent crates' tests

pub mod analyzer;
pub mod openai;
pub mod prompt;
pub mod vision;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use analyzer::{detect_image_mime, to_data_uri, PlanAnalyzer};
pub use openai::{OpenAIConfig, OpenAIVisionBackend};
pub use vision::{SamplingParams, VisionBackend, VisionRequest};
