//! Object-storage endpoints.
//!
//! Uploads go through a presigned URL: the backend hands out a short-lived
//! write URL plus the durable public URL, the bytes are PUT directly to
//! storage, and orphaned objects are removed through the backend.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::{ApiClient, check_status};
use crate::error::ApiError;

/// Body of `POST /uploads/presigned-url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrlRequest {
    pub filename: String,
    pub content_type: String,
    pub folder: String,
    pub file_size: u64,
}

/// Response of `POST /uploads/presigned-url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrl {
    /// Write-only, time-limited endpoint.
    pub upload_url: String,
    /// Durable public read URL.
    pub file_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteFileRequest {
    pub file_url: String,
}

/// Storage operations used by the upload lifecycle.
#[async_trait]
pub trait StorageApi: Send + Sync {
    /// Request write authorization for a file.
    async fn presign(&self, request: &PresignedUrlRequest) -> Result<PresignedUrl, ApiError>;

    /// Transfer file bytes to a presigned URL.
    async fn put_object(
        &self,
        upload_url: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<(), ApiError>;

    /// Delete a stored object by its public URL.
    async fn delete_object(&self, file_url: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl StorageApi for ApiClient {
    async fn presign(&self, request: &PresignedUrlRequest) -> Result<PresignedUrl, ApiError> {
        let presigned: PresignedUrl = self.post_json("/uploads/presigned-url", request).await?;
        debug!(
            folder = %request.folder,
            filename = %request.filename,
            file_url = %presigned.file_url,
            "presigned upload URL issued"
        );
        Ok(presigned)
    }

    async fn put_object(
        &self,
        upload_url: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<(), ApiError> {
        // The presigned URL carries its own authorization; a bearer header
        // would invalidate the storage signature. A storage 401 says nothing
        // about the backend session.
        let response = self
            .http()
            .put(upload_url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .await?;

        check_status(response).await?;
        debug!(size = bytes.len(), content_type = %content_type, "file transferred to storage");
        Ok(())
    }

    async fn delete_object(&self, file_url: &str) -> Result<(), ApiError> {
        let body = DeleteFileRequest {
            file_url: file_url.to_string(),
        };
        self.delete("/uploads/", Some(&body)).await?;
        debug!(file_url = %file_url, "stored file deleted");
        Ok(())
    }
}
