//! # plancritic-client
//!
//! Client side of the plan upload form.
//!
//! - [`UploadController`]: form state and the submission state machine
//! - [`PreviewStore`]: acquisition and release of file preview handles
//! - [`CaptionTicker`]: status captions cycled while an analysis runs
//! - [`HttpAnalysisTransport`]: multipart POST to the relay
//! - [`score_indicators`]: the four percentage rings under the critique

pub mod config;
pub mod controller;
pub mod indicators;
pub mod preview;
pub mod ticker;
pub mod transport;

pub use config::ClientConfig;
pub use controller::{FileBlob, Phase, UploadController, UploadSnapshot};
pub use indicators::{score_indicators, ScoreIndicator};
pub use preview::{ObjectUrlStore, PreviewHandle, PreviewStore};
pub use ticker::{CaptionTicker, TickerGuard};
pub use transport::{AnalysisTransport, HttpAnalysisTransport, Submission};
