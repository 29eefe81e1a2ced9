//! Presign-then-PUT transfer.

use tracing::{debug, warn};

use super::file::LocalFile;
use super::folder::UploadFolder;
use crate::api::{PresignedUrlRequest, StorageApi};
use crate::error::UploadError;

/// Upload `file` into `folder` and return its public URL.
///
/// No retries: a failure at either step is returned and the caller
/// re-initiates.
pub async fn upload(
    storage: &dyn StorageApi,
    file: &LocalFile,
    folder: &UploadFolder,
) -> Result<String, UploadError> {
    let request = PresignedUrlRequest {
        filename: file.name().to_string(),
        content_type: file.content_type().to_string(),
        folder: folder.as_str().to_string(),
        file_size: file.size(),
    };

    let presigned = storage.presign(&request).await.map_err(|e| {
        warn!(error = %e, folder = %folder, "presigned URL request failed");
        UploadError::authorization(e)
    })?;

    storage
        .put_object(&presigned.upload_url, file.content_type(), file.bytes())
        .await
        .map_err(|e| {
            warn!(error = %e, filename = %file.name(), "storage transfer failed");
            UploadError::Transfer(e)
        })?;

    debug!(
        file_url = %presigned.file_url,
        folder = %folder,
        size = file.size(),
        "file uploaded"
    );
    Ok(presigned.file_url)
}
