//! Preview handle lifecycle.
//!
//! A preview is a URI standing in for the selected file (an object URL in a
//! browser). Every handle obtained from [`PreviewStore::create`] must be given
//! back to [`PreviewStore::revoke`] exactly once.

use std::collections::HashSet;
use std::sync::Mutex;

use uuid::Uuid;

use crate::controller::FileBlob;

/// An acquired preview. Deliberately not `Clone`: one handle, one release.
#[derive(Debug, PartialEq, Eq)]
pub struct PreviewHandle {
    uri: String,
}

impl PreviewHandle {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Source of preview handles.
pub trait PreviewStore: Send + Sync {
    fn create(&self, file: &FileBlob) -> PreviewHandle;
    fn revoke(&self, handle: PreviewHandle);
}

/// In-memory store issuing `blob:` URIs and tracking which are live.
#[derive(Debug, Default)]
pub struct ObjectUrlStore {
    live: Mutex<HashSet<String>>,
}

impl ObjectUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles created and not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_live(&self, uri: &str) -> bool {
        self.live.lock().map(|l| l.contains(uri)).unwrap_or(false)
    }
}

impl PreviewStore for ObjectUrlStore {
    fn create(&self, file: &FileBlob) -> PreviewHandle {
        let uri = format!("blob:plancritic/{}", Uuid::new_v4());
        if let Ok(mut live) = self.live.lock() {
            live.insert(uri.clone());
        }
        tracing::trace!(uri = %uri, file = %file.name, "Preview created");
        PreviewHandle::new(uri)
    }

    fn revoke(&self, handle: PreviewHandle) {
        let removed = self
            .live
            .lock()
            .map(|mut live| live.remove(handle.uri()))
            .unwrap_or(false);
        if !removed {
            tracing::warn!(uri = %handle.uri(), "Revoked unknown preview");
        }
    }
}
