//! Edit sessions for records that own an uploaded image.
//!
//! Opening the editor opens the upload session, submitting commits it, and
//! cancelling discards it.

use serde::Serialize;
use tracing::{debug, info};

use crate::api::{EntityId, EntityStore};
use crate::error::FormError;
use crate::upload::UploadManager;

/// Raw form inputs that validate into a typed payload.
pub trait Draft {
    type Payload: Serialize + Send + Sync;

    /// Validate required fields and build the payload with the image URL.
    fn to_payload(&self, image_url: Option<String>) -> Result<Self::Payload, FormError>;
}

/// A create or edit form with one image field.
pub struct EntityEditor<D: Draft> {
    id: Option<EntityId>,
    draft: D,
    uploads: UploadManager,
}

impl<D: Draft> EntityEditor<D> {
    /// Form for a new record; the upload session starts empty.
    pub fn create(draft: D, mut uploads: UploadManager) -> Self {
        uploads.begin_session("");
        Self {
            id: None,
            draft,
            uploads,
        }
    }

    /// Form for an existing record with its saved image, if any.
    pub fn edit(
        id: EntityId,
        draft: D,
        committed_image: Option<&str>,
        mut uploads: UploadManager,
    ) -> Self {
        uploads.begin_session(committed_image.unwrap_or_default());
        Self {
            id: Some(id),
            draft,
            uploads,
        }
    }

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    pub fn uploads(&self) -> &UploadManager {
        &self.uploads
    }

    pub fn uploads_mut(&mut self) -> &mut UploadManager {
        &mut self.uploads
    }

    /// Validate and save.
    ///
    /// Validation failures make no network call. On a failed save the upload
    /// session stays open so the user can retry or cancel.
    pub async fn submit<S>(&mut self, store: &S) -> Result<S::Record, FormError>
    where
        S: EntityStore<D::Payload> + ?Sized,
    {
        let image_url = self.uploads.current_url().map(str::to_string);
        let payload = self.draft.to_payload(image_url)?;

        let record = match self.id {
            Some(id) => store.update(id, &payload).await?,
            None => store.create(&payload).await?,
        };

        let image = self.uploads.commit();
        info!(
            id = ?self.id,
            image = image.as_deref().unwrap_or(""),
            "record saved"
        );
        Ok(record)
    }

    /// Close without saving, deleting any unsaved upload.
    pub async fn cancel(&mut self) {
        debug!(id = ?self.id, "edit cancelled");
        self.uploads.discard_session().await;
    }
}

impl<D: Draft + std::fmt::Debug> std::fmt::Debug for EntityEditor<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityEditor")
            .field("id", &self.id)
            .field("draft", &self.draft)
            .field("uploads", &self.uploads)
            .finish()
    }
}
