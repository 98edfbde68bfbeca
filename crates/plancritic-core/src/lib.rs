//! # plancritic-core
//!
//! Core types, score extraction, and error handling for plancritic.
//!
//! This crate provides the data structures shared by the relay server and
//! the upload client, and the parser that turns a model's closing line into
//! structured scores.

pub mod defaults;
pub mod error;
pub mod models;
pub mod scores;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use scores::{extract_scores, format_score_line, parse_score_line};
