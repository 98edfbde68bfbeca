//! HTTP handlers for plancritic-api.

pub mod analyze;
pub mod health;
