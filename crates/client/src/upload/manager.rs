//! Upload field controller.
//!
//! Owns one [`UploadSession`] and drives it from user actions: pick a file,
//! replace it, remove it, type a URL by hand, and finally commit or discard
//! when the hosting form is saved or closed. Objects left unreferenced along
//! the way are deleted best-effort.
//!
//! Every operation takes `&mut self`, so a manager never has more than one
//! upload in flight.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::constraints::UploadConstraints;
use super::file::LocalFile;
use super::folder::UploadFolder;
use super::listener::{AssetListener, NoopListener, UploadState};
use super::session::UploadSession;
use super::transfer;
use crate::api::StorageApi;
use crate::error::UploadError;

/// Controller for a single upload field.
pub struct UploadManager {
    storage: Arc<dyn StorageApi>,
    listener: Arc<dyn AssetListener>,
    folder: UploadFolder,
    constraints: UploadConstraints,
    session: UploadSession,
    state: UploadState,
}

impl UploadManager {
    /// Create a manager with an empty session (new entity).
    pub fn new(
        storage: Arc<dyn StorageApi>,
        folder: UploadFolder,
        constraints: UploadConstraints,
    ) -> Self {
        Self {
            storage,
            listener: Arc::new(NoopListener),
            folder,
            constraints,
            session: UploadSession::default(),
            state: UploadState::Idle,
        }
    }

    /// Set the listener notified of value, error and state changes.
    pub fn with_listener(mut self, listener: Arc<dyn AssetListener>) -> Self {
        self.listener = listener;
        self
    }

    /// Start the session from the entity's saved asset URL.
    pub fn with_committed_url(mut self, committed_url: impl Into<String>) -> Self {
        self.session = UploadSession::open(committed_url);
        self
    }

    /// Start a fresh session, e.g. when the form is reopened for another entity.
    ///
    /// Any pending session upload of the previous edit is not cleaned up here;
    /// call [`discard_session`](Self::discard_session) first.
    pub fn begin_session(&mut self, committed_url: impl Into<String>) {
        self.session = UploadSession::open(committed_url);
        self.set_state(UploadState::Idle);
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    pub fn folder(&self) -> &UploadFolder {
        &self.folder
    }

    pub fn constraints(&self) -> &UploadConstraints {
        &self.constraints
    }

    /// The value the form currently shows, if any.
    pub fn current_url(&self) -> Option<&str> {
        let url = self.session.displayed_url();
        (!url.is_empty()).then_some(url)
    }

    /// Validate and upload a picked file.
    ///
    /// Validation failures never reach the network. On success the new URL
    /// becomes the session upload and the displayed value; a session upload
    /// it replaces is deleted.
    pub async fn select_file(&mut self, file: LocalFile) -> Result<String, UploadError> {
        self.set_state(UploadState::Validating);
        if let Err(e) = self.constraints.validate(&file) {
            debug!(filename = %file.name(), error = %e, "file rejected");
            return Err(self.fail(e.into()));
        }

        self.set_state(UploadState::Uploading);
        let file_url = match transfer::upload(&*self.storage, &file, &self.folder).await {
            Ok(url) => url,
            Err(e) => return Err(self.fail(e)),
        };

        let orphan = self.session.record_upload(file_url.clone());
        self.set_state(UploadState::Idle);
        self.listener.on_asset_changed(&file_url);

        if let Some(orphan) = orphan {
            self.cleanup(&orphan).await;
        }

        Ok(file_url)
    }

    /// Upload a new file over the current asset.
    ///
    /// The previous session upload, if any, is deleted only after the new
    /// upload succeeds, so a failed replacement keeps the current asset. The
    /// committed asset is never deleted here.
    pub async fn replace(&mut self, file: LocalFile) -> Result<String, UploadError> {
        self.select_file(file).await
    }

    /// Clear the field.
    ///
    /// A session upload is deleted immediately. A committed asset is only
    /// cleared from the display.
    pub async fn remove(&mut self) {
        let orphan = self.session.remove();
        self.listener.on_asset_changed("");

        if let Some(orphan) = orphan {
            self.cleanup(&orphan).await;
        }
    }

    /// Use a URL typed by the user instead of an upload.
    pub async fn set_manual_url(&mut self, url: &str) {
        let url = url.trim();
        let orphan = self.session.set_manual(url);
        self.listener.on_asset_changed(url);

        if let Some(orphan) = orphan {
            self.cleanup(&orphan).await;
        }
    }

    /// The hosting form was saved. Returns the committed URL.
    pub fn commit(&mut self) -> Option<String> {
        let committed = self.session.commit();
        debug!(url = committed.as_deref().unwrap_or(""), "upload session committed");
        committed
    }

    /// The hosting form was closed without saving.
    ///
    /// Deletes this session's upload, if any. Safe to call repeatedly.
    pub async fn discard_session(&mut self) {
        if let Some(orphan) = self.session.discard() {
            self.cleanup(&orphan).await;
        }
    }

    fn set_state(&mut self, state: UploadState) {
        if self.state != state {
            self.state = state;
            self.listener.on_state_changed(state);
        }
    }

    fn fail(&mut self, error: UploadError) -> UploadError {
        self.set_state(UploadState::Idle);
        self.listener.on_error(&error.user_message());
        error
    }

    /// Best-effort delete of an orphaned object. Failures are logged only.
    async fn cleanup(&self, file_url: &str) {
        match self.storage.delete_object(file_url).await {
            Ok(()) => info!(file_url = %file_url, "orphaned upload deleted"),
            Err(e) => warn!(error = %e, file_url = %file_url, "failed to delete orphaned upload"),
        }
    }
}

impl std::fmt::Debug for UploadManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadManager")
            .field("folder", &self.folder)
            .field("state", &self.state)
            .field("session", &self.session)
            .finish()
    }
}
