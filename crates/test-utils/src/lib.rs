//! Physio client test utilities.
//!
//! Recording fakes for the storage and record APIs, a listener that keeps
//! every callback, and fixtures for files and records.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use physio_client::ApiError;
use physio_client::api::{EntityId, EntityStore, PresignedUrl, PresignedUrlRequest, StorageApi};
use physio_client::forms::Doctor;
use physio_client::upload::{AssetListener, LocalFile, UploadState};

/// One call made against [`RecordingStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    Presign(PresignedUrlRequest),
    Put {
        upload_url: String,
        content_type: String,
        size: usize,
    },
    Delete(String),
}

/// In-memory [`StorageApi`] that records every call.
///
/// Issues file URLs from the queue given to [`returning`](Self::returning),
/// then falls back to numbered `https://cdn.test/uploads/N` URLs.
#[derive(Debug, Default)]
pub struct RecordingStorage {
    calls: Mutex<Vec<StorageCall>>,
    file_urls: Mutex<VecDeque<String>>,
    issued: Mutex<usize>,
    presign_status: Option<u16>,
    put_status: Option<u16>,
    delete_status: Option<u16>,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// File URLs handed out by successive presign calls.
    pub fn returning<I, S>(self, file_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_urls
            .lock()
            .extend(file_urls.into_iter().map(Into::into));
        self
    }

    /// Presign requests fail with `status`.
    pub fn failing_presign(mut self, status: u16) -> Self {
        self.presign_status = Some(status);
        self
    }

    /// Storage PUTs fail with `status`.
    pub fn failing_put(mut self, status: u16) -> Self {
        self.put_status = Some(status);
        self
    }

    /// Deletes fail with `status`.
    pub fn failing_delete(mut self, status: u16) -> Self {
        self.delete_status = Some(status);
        self
    }

    pub fn calls(&self) -> Vec<StorageCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn presigns(&self) -> Vec<PresignedUrlRequest> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                StorageCall::Presign(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn put_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, StorageCall::Put { .. }))
            .count()
    }

    /// File URLs passed to delete, in call order.
    pub fn deletes(&self) -> Vec<String> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                StorageCall::Delete(url) => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: StorageCall) {
        self.calls.lock().push(call);
    }

    fn next_file_url(&self) -> (usize, String) {
        let n = {
            let mut issued = self.issued.lock();
            *issued += 1;
            *issued
        };
        let url = self
            .file_urls
            .lock()
            .pop_front()
            .unwrap_or_else(|| format!("https://cdn.test/uploads/{n}"));
        (n, url)
    }
}

fn status_error(status: u16) -> ApiError {
    ApiError::Status {
        status,
        detail: Some(format!("simulated {status}")),
    }
}

#[async_trait]
impl StorageApi for RecordingStorage {
    async fn presign(&self, request: &PresignedUrlRequest) -> Result<PresignedUrl, ApiError> {
        self.record(StorageCall::Presign(request.clone()));
        if let Some(status) = self.presign_status {
            return Err(status_error(status));
        }

        let (n, file_url) = self.next_file_url();
        Ok(PresignedUrl {
            upload_url: format!("https://storage.test/put/{n}?signature=test"),
            file_url,
        })
    }

    async fn put_object(
        &self,
        upload_url: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<(), ApiError> {
        self.record(StorageCall::Put {
            upload_url: upload_url.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len(),
        });
        match self.put_status {
            Some(status) => Err(status_error(status)),
            None => Ok(()),
        }
    }

    async fn delete_object(&self, file_url: &str) -> Result<(), ApiError> {
        self.record(StorageCall::Delete(file_url.to_string()));
        match self.delete_status {
            Some(status) => Err(status_error(status)),
            None => Ok(()),
        }
    }
}

/// One callback received by [`RecordingListener`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerEvent {
    AssetChanged(String),
    Error(String),
    State(UploadState),
}

/// [`AssetListener`] that keeps every callback.
#[derive(Debug, Default)]
pub struct RecordingListener {
    events: Mutex<Vec<ListenerEvent>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ListenerEvent> {
        self.events.lock().clone()
    }

    /// Most recent asset value, if any change was reported.
    pub fn last_asset(&self) -> Option<String> {
        self.events.lock().iter().rev().find_map(|e| match e {
            ListenerEvent::AssetChanged(url) => Some(url.clone()),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ListenerEvent::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn states(&self) -> Vec<UploadState> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ListenerEvent::State(state) => Some(*state),
                _ => None,
            })
            .collect()
    }
}

impl AssetListener for RecordingListener {
    fn on_asset_changed(&self, url: &str) {
        self.events
            .lock()
            .push(ListenerEvent::AssetChanged(url.to_string()));
    }

    fn on_error(&self, message: &str) {
        self.events
            .lock()
            .push(ListenerEvent::Error(message.to_string()));
    }

    fn on_state_changed(&self, state: UploadState) {
        self.events.lock().push(ListenerEvent::State(state));
    }
}

/// A save recorded by [`RecordingStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum Saved<P> {
    Created(P),
    Updated(EntityId, P),
}

impl<P> Saved<P> {
    pub fn payload(&self) -> &P {
        match self {
            Saved::Created(p) | Saved::Updated(_, p) => p,
        }
    }
}

/// [`EntityStore`] that records payloads and echoes them back.
#[derive(Debug)]
pub struct RecordingStore<P> {
    saved: Mutex<Vec<Saved<P>>>,
    fail_status: Option<u16>,
}

impl<P> Default for RecordingStore<P> {
    fn default() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            fail_status: None,
        }
    }
}

impl<P: Clone> RecordingStore<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every save fails with `status`. Attempts are still recorded.
    pub fn failing(mut self, status: u16) -> Self {
        self.fail_status = Some(status);
        self
    }

    pub fn saved(&self) -> Vec<Saved<P>> {
        self.saved.lock().clone()
    }

    fn save(&self, saved: Saved<P>) -> Result<P, ApiError> {
        let payload = saved.payload().clone();
        self.saved.lock().push(saved);
        match self.fail_status {
            Some(status) => Err(status_error(status)),
            None => Ok(payload),
        }
    }
}

#[async_trait]
impl<P> EntityStore<P> for RecordingStore<P>
where
    P: Clone + Send + Sync,
{
    type Record = P;

    async fn create(&self, payload: &P) -> Result<P, ApiError> {
        self.save(Saved::Created(payload.clone()))
    }

    async fn update(&self, id: EntityId, payload: &P) -> Result<P, ApiError> {
        self.save(Saved::Updated(id, payload.clone()))
    }
}

/// A file of `size` zero bytes.
pub fn test_file(name: &str, content_type: &str, size: usize) -> LocalFile {
    LocalFile::new(name, content_type, vec![0u8; size])
}

/// A small PNG.
pub fn png(name: &str) -> LocalFile {
    test_file(name, "image/png", 2048)
}

/// A doctor record with the given saved image.
pub fn doctor(id: EntityId, profile_image: Option<&str>) -> Doctor {
    Doctor {
        id,
        name: "Dr. Meera Rao".to_string(),
        specialization: "Sports Physiotherapy".to_string(),
        email: Some("meera@clinic.test".to_string()),
        phone: None,
        qualification: Some("MPT".to_string()),
        experience_years: Some(8),
        bio: None,
        consultation_fee: Some(800.0),
        profile_image: profile_image.map(str::to_string),
        is_active: true,
    }
}
