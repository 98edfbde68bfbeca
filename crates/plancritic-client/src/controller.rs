//! Upload controller: the state machine behind the plan upload form.
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Done
//!                     │
//!                     └──err──▶ Error
//! any ──reset──▶ Idle
//! ```
//!
//! One submission may be in flight at a time. While loading, a caption ticker
//! cycles status messages; it is stopped on every exit from `Loading`.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};

use plancritic_core::{defaults, Error, Orientation, Result, Scores};

use crate::preview::{PreviewHandle, PreviewStore};
use crate::ticker::CaptionTicker;
use crate::transport::{AnalysisTransport, Submission};

/// A file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileBlob {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Done,
    Error,
}

#[derive(Debug)]
struct UploadState {
    file: Option<FileBlob>,
    preview: Option<PreviewHandle>,
    city: String,
    orientation: Option<Orientation>,
    phase: Phase,
    result_text: String,
    scores: Option<Scores>,
}

impl Default for UploadState {
    fn default() -> Self {
        Self {
            file: None,
            preview: None,
            city: defaults::CLIENT_CITY.to_string(),
            orientation: Some(Orientation::default()),
            phase: Phase::Idle,
            result_text: String::new(),
            scores: None,
        }
    }
}

impl UploadState {
    fn validate(&self) -> Result<()> {
        if self.phase == Phase::Loading {
            return Err(Error::Busy("An analysis is already in progress".to_string()));
        }
        if self.file.is_none() {
            return Err(Error::InvalidInput("No plan file selected".to_string()));
        }
        if self.city.trim().is_empty() {
            return Err(Error::InvalidInput("No city selected".to_string()));
        }
        if self.orientation.is_none() {
            return Err(Error::InvalidInput("No orientation selected".to_string()));
        }
        Ok(())
    }
}

/// Point-in-time view of the form for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSnapshot {
    pub file_name: Option<String>,
    pub preview_uri: Option<String>,
    pub city: String,
    pub orientation: Option<Orientation>,
    pub phase: Phase,
    pub result_text: String,
    pub scores: Option<Scores>,
    pub loading_caption: Option<&'static str>,
}

struct Inner {
    state: Mutex<UploadState>,
    transport: Arc<dyn AnalysisTransport>,
    previews: Arc<dyn PreviewStore>,
    captions: CaptionTicker,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, UploadState> {
        // State stays consistent across a panic; recover the guard.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let preview = self
            .state
            .get_mut()
            .map(|s| s.preview.take())
            .unwrap_or_else(|poisoned| poisoned.into_inner().preview.take());
        if let Some(handle) = preview {
            self.previews.revoke(handle);
        }
    }
}

/// Leaves `Loading` if the submission future is dropped before finishing.
struct LoadingScope<'a> {
    inner: &'a Inner,
}

impl Drop for LoadingScope<'_> {
    fn drop(&mut self) {
        self.inner.captions.stop();
        let mut state = self.inner.lock();
        if state.phase == Phase::Loading {
            warn!("Submission abandoned before completion");
            state.phase = Phase::Idle;
        }
    }
}

/// Cloneable handle to one upload form.
#[derive(Clone)]
pub struct UploadController {
    inner: Arc<Inner>,
}

impl UploadController {
    pub fn new(transport: Arc<dyn AnalysisTransport>, previews: Arc<dyn PreviewStore>) -> Self {
        Self::with_ticker(transport, previews, CaptionTicker::default())
    }

    pub fn with_ticker(
        transport: Arc<dyn AnalysisTransport>,
        previews: Arc<dyn PreviewStore>,
        captions: CaptionTicker,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(UploadState::default()),
                transport,
                previews,
                captions,
            }),
        }
    }

    /// Replace the selected file. The previous preview is released first.
    pub fn select_file(&self, file: Option<FileBlob>) {
        let mut state = self.inner.lock();
        if let Some(old) = state.preview.take() {
            self.inner.previews.revoke(old);
        }
        state.preview = file.as_ref().map(|f| self.inner.previews.create(f));
        state.file = file;
    }

    pub fn clear_file(&self) {
        self.select_file(None);
    }

    pub fn set_city(&self, city: impl Into<String>) {
        self.inner.lock().city = city.into();
    }

    pub fn set_orientation(&self, orientation: Option<Orientation>) {
        self.inner.lock().orientation = orientation;
    }

    pub fn can_submit(&self) -> bool {
        self.inner.lock().validate().is_ok()
    }

    /// Send the form and wait for the critique.
    ///
    /// Returns the phase the form ends in (`Done` or `Error`). Rejected with
    /// `Busy` or `InvalidInput`, without contacting the relay, when
    /// [`can_submit`](Self::can_submit) is false.
    pub async fn submit(&self) -> Result<Phase> {
        let submission = {
            let mut state = self.inner.lock();
            state.validate()?;

            let (Some(file), Some(orientation)) = (state.file.clone(), state.orientation) else {
                return Err(Error::InvalidInput("Form is incomplete".to_string()));
            };
            state.phase = Phase::Loading;
            state.result_text.clear();
            state.scores = None;
            Submission {
                file,
                city: state.city.clone(),
                orientation,
            }
        };

        let _scope = LoadingScope { inner: &self.inner };
        let _ticker = self.inner.captions.start();

        info!(
            file = %submission.file.name,
            city = %submission.city,
            orientation = %submission.orientation,
            "Submitting plan for analysis"
        );
        let outcome = self.inner.transport.analyze(&submission).await;

        let mut state = self.inner.lock();
        match outcome {
            Ok(response) => {
                debug!(has_scores = response.scores.is_some(), "Analysis received");
                state.result_text = response.text;
                state.scores = response.scores;
                state.phase = Phase::Done;
            }
            Err(e) => {
                warn!(error = %e, "Analysis request failed");
                state.result_text = format!("{}{}", defaults::REQUEST_ERROR_PREFIX, e.message());
                state.scores = None;
                state.phase = Phase::Error;
            }
        }
        Ok(state.phase)
    }

    /// Back to a fresh form. Any in-flight answer still lands when it arrives.
    pub fn reset(&self) {
        let mut state = self.inner.lock();
        if let Some(handle) = state.preview.take() {
            self.inner.previews.revoke(handle);
        }
        let phase = state.phase;
        *state = UploadState::default();
        // A pending submission keeps its own Loading exit.
        if phase == Phase::Loading {
            state.phase = Phase::Loading;
        }
    }

    pub fn phase(&self) -> Phase {
        self.inner.lock().phase
    }

    pub fn result_text(&self) -> String {
        self.inner.lock().result_text.clone()
    }

    pub fn scores(&self) -> Option<Scores> {
        self.inner.lock().scores
    }

    pub fn preview_uri(&self) -> Option<String> {
        self.inner.lock().preview.as_ref().map(|p| p.uri().to_string())
    }

    /// Current status caption, only while loading.
    pub fn loading_caption(&self) -> Option<&'static str> {
        (self.phase() == Phase::Loading).then(|| self.inner.captions.caption())
    }

    /// Caption progress fraction, only while loading.
    pub fn progress(&self) -> Option<f64> {
        (self.phase() == Phase::Loading).then(|| self.inner.captions.progress())
    }

    pub fn snapshot(&self) -> UploadSnapshot {
        let state = self.inner.lock();
        let loading = state.phase == Phase::Loading;
        UploadSnapshot {
            file_name: state.file.as_ref().map(|f| f.name.clone()),
            preview_uri: state.preview.as_ref().map(|p| p.uri().to_string()),
            city: state.city.clone(),
            orientation: state.orientation,
            phase: state.phase,
            result_text: state.result_text.clone(),
            scores: state.scores,
            loading_caption: loading.then(|| self.inner.captions.caption()),
        }
    }
}
