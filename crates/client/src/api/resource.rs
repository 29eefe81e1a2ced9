//! Generic REST collection access (`/doctors/`, `/services/`, ...).

use std::marker::PhantomData;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::client::ApiClient;
use crate::error::ApiError;

/// Backend record identifier.
pub type EntityId = i64;

/// Persists form payloads. The form editor only needs create and update.
#[async_trait]
pub trait EntityStore<P>: Send + Sync
where
    P: Send + Sync,
{
    type Record: Send;

    async fn create(&self, payload: &P) -> Result<Self::Record, ApiError>;

    async fn update(&self, id: EntityId, payload: &P) -> Result<Self::Record, ApiError>;
}

/// A REST collection sending `P` payloads and returning `R` records.
pub struct Resource<P, R> {
    client: ApiClient,
    path: &'static str,
    _types: PhantomData<fn(P) -> R>,
}

impl<P, R> Resource<P, R>
where
    P: Serialize + Send + Sync,
    R: DeserializeOwned + Send,
{
    /// `path` is the collection path with trailing slash, e.g. `/doctors/`.
    pub fn new(client: ApiClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            _types: PhantomData,
        }
    }

    fn item_path(&self, id: EntityId) -> String {
        format!("{}{id}", self.path)
    }

    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        self.client.get_json(self.path).await
    }

    pub async fn get(&self, id: EntityId) -> Result<R, ApiError> {
        self.client.get_json(&self.item_path(id)).await
    }

    pub async fn create(&self, payload: &P) -> Result<R, ApiError> {
        self.client.post_json(self.path, payload).await
    }

    pub async fn update(&self, id: EntityId, payload: &P) -> Result<R, ApiError> {
        self.client.put_json(&self.item_path(id), payload).await
    }

    pub async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        self.client.delete::<()>(&self.item_path(id), None).await
    }
}

#[async_trait]
impl<P, R> EntityStore<P> for Resource<P, R>
where
    P: Serialize + Send + Sync,
    R: DeserializeOwned + Send,
{
    type Record = R;

    async fn create(&self, payload: &P) -> Result<R, ApiError> {
        Resource::create(self, payload).await
    }

    async fn update(&self, id: EntityId, payload: &P) -> Result<R, ApiError> {
        Resource::update(self, id, payload).await
    }
}

impl<P, R> std::fmt::Debug for Resource<P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource").field("path", &self.path).finish()
    }
}
