#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Upload lifecycle tests against recording fakes.

use std::sync::Arc;

use physio_client::UploadError;
use physio_client::upload::{UploadConstraints, UploadFolder, UploadManager, UploadState};
use physio_test_utils::{
    ListenerEvent, RecordingListener, RecordingStorage, StorageCall, png, test_file,
};

fn manager(storage: &Arc<RecordingStorage>, committed: &str) -> UploadManager {
    UploadManager::new(
        storage.clone(),
        UploadFolder::Doctors,
        UploadConstraints::images(),
    )
    .with_committed_url(committed)
}

#[tokio::test]
async fn test_unsupported_type_makes_no_network_call() {
    let storage = Arc::new(RecordingStorage::new());
    let listener = Arc::new(RecordingListener::new());
    let mut uploads = manager(&storage, "").with_listener(listener.clone());

    let result = uploads
        .select_file(test_file("cv.docx", "application/msword", 100))
        .await;

    assert!(matches!(result, Err(UploadError::Validation(_))));
    assert_eq!(storage.call_count(), 0);
    assert_eq!(uploads.state(), UploadState::Idle);
    assert_eq!(uploads.current_url(), None);

    let errors = listener.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("JPEG"), "message names accepted types: {}", errors[0]);
}

#[tokio::test]
async fn test_oversized_file_makes_no_network_call() {
    let storage = Arc::new(RecordingStorage::new());
    let listener = Arc::new(RecordingListener::new());
    let mut uploads = UploadManager::new(
        storage.clone(),
        UploadFolder::Doctors,
        UploadConstraints::images().with_max_size(1024),
    )
    .with_listener(listener.clone());

    let result = uploads
        .select_file(test_file("big.png", "image/png", 1025))
        .await;

    assert!(matches!(result, Err(UploadError::Validation(_))));
    assert_eq!(storage.call_count(), 0);
    assert_eq!(listener.errors(), vec!["File size must be at most 1 KB.".to_string()]);
}

#[tokio::test]
async fn test_successful_upload_sets_session_and_display() {
    let storage = Arc::new(RecordingStorage::new().returning(["https://cdn/y.png"]));
    let listener = Arc::new(RecordingListener::new());
    let mut uploads = manager(&storage, "https://cdn/x.png").with_listener(listener.clone());

    let url = uploads.select_file(png("portrait.png")).await.unwrap();

    assert_eq!(url, "https://cdn/y.png");
    assert_eq!(uploads.session().session_url(), "https://cdn/y.png");
    assert_eq!(uploads.current_url(), Some("https://cdn/y.png"));
    assert_eq!(listener.last_asset().as_deref(), Some("https://cdn/y.png"));
    assert_eq!(
        listener.states(),
        vec![
            UploadState::Validating,
            UploadState::Uploading,
            UploadState::Idle
        ]
    );
}

#[tokio::test]
async fn test_upload_sends_presign_then_put() {
    let storage = Arc::new(RecordingStorage::new().returning(["https://cdn/y.png"]));
    let mut uploads = UploadManager::new(
        storage.clone(),
        UploadFolder::Services,
        UploadConstraints::images(),
    );

    uploads.select_file(png("massage.png")).await.unwrap();

    let calls = storage.calls();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        StorageCall::Presign(request) => {
            assert_eq!(request.filename, "massage.png");
            assert_eq!(request.content_type, "image/png");
            assert_eq!(request.folder, "services");
            assert_eq!(request.file_size, 2048);
        }
        other => panic!("expected presign, got {other:?}"),
    }
    match &calls[1] {
        StorageCall::Put {
            upload_url,
            content_type,
            size,
        } => {
            assert!(upload_url.starts_with("https://storage.test/put/"));
            assert_eq!(content_type, "image/png");
            assert_eq!(*size, 2048);
        }
        other => panic!("expected put, got {other:?}"),
    }
}

#[tokio::test]
async fn test_discard_without_upload_deletes_nothing() {
    let storage = Arc::new(RecordingStorage::new());
    let mut uploads = manager(&storage, "https://cdn/x.png");

    uploads.discard_session().await;

    assert!(storage.deletes().is_empty());
}

#[tokio::test]
async fn test_discard_deletes_session_upload_once() {
    let storage = Arc::new(RecordingStorage::new().returning(["https://cdn/y.png"]));
    let mut uploads = manager(&storage, "");

    uploads.select_file(png("a.png")).await.unwrap();
    uploads.discard_session().await;
    uploads.discard_session().await;

    assert_eq!(storage.deletes(), vec!["https://cdn/y.png".to_string()]);
}

#[tokio::test]
async fn test_cancel_edit_deletes_only_new_upload() {
    let storage = Arc::new(RecordingStorage::new().returning(["https://cdn/y.png"]));
    let mut uploads = manager(&storage, "https://cdn/x.png");

    uploads.select_file(png("new.png")).await.unwrap();
    uploads.discard_session().await;

    assert_eq!(storage.deletes(), vec!["https://cdn/y.png".to_string()]);
    let mentions_x = storage.calls().iter().any(|c| match c {
        StorageCall::Delete(url) => url == "https://cdn/x.png",
        StorageCall::Put { upload_url, .. } => upload_url == "https://cdn/x.png",
        StorageCall::Presign(_) => false,
    });
    assert!(!mentions_x);
    assert_eq!(uploads.current_url(), Some("https://cdn/x.png"));
}

#[tokio::test]
async fn test_replace_deletes_previous_session_upload() {
    let storage = Arc::new(
        RecordingStorage::new().returning(["https://cdn/a.png", "https://cdn/b.png"]),
    );
    let mut uploads = manager(&storage, "https://cdn/x.png");

    uploads.select_file(png("a.png")).await.unwrap();
    assert!(storage.deletes().is_empty());

    uploads.replace(png("b.png")).await.unwrap();

    assert_eq!(storage.deletes(), vec!["https://cdn/a.png".to_string()]);
    assert_eq!(uploads.current_url(), Some("https://cdn/b.png"));
    assert_eq!(uploads.session().committed_url(), "https://cdn/x.png");
}

#[tokio::test]
async fn test_replace_committed_asset_deletes_nothing() {
    let storage = Arc::new(RecordingStorage::new().returning(["https://cdn/a.png"]));
    let mut uploads = manager(&storage, "https://cdn/x.png");

    uploads.replace(png("a.png")).await.unwrap();

    assert!(storage.deletes().is_empty());
}

#[tokio::test]
async fn test_failed_replace_keeps_current_upload() {
    let storage = Arc::new(RecordingStorage::new().returning(["https://cdn/a.png"]));
    let mut uploads = manager(&storage, "");
    uploads.select_file(png("a.png")).await.unwrap();

    let result = uploads
        .replace(test_file("b.tiff", "image/tiff", 10))
        .await;

    assert!(result.is_err());
    assert!(storage.deletes().is_empty());
    assert_eq!(uploads.current_url(), Some("https://cdn/a.png"));
}

#[tokio::test]
async fn test_remove_session_upload_deletes_immediately() {
    let storage = Arc::new(RecordingStorage::new().returning(["https://cdn/y.png"]));
    let listener = Arc::new(RecordingListener::new());
    let mut uploads = manager(&storage, "https://cdn/x.png").with_listener(listener.clone());

    uploads.select_file(png("y.png")).await.unwrap();
    uploads.remove().await;

    assert_eq!(storage.deletes(), vec!["https://cdn/y.png".to_string()]);
    assert_eq!(uploads.current_url(), None);
    assert_eq!(uploads.session().session_url(), "");
    assert_eq!(listener.last_asset().as_deref(), Some(""));

    // Nothing left to clean up.
    uploads.discard_session().await;
    assert_eq!(storage.deletes().len(), 1);
}

#[tokio::test]
async fn test_remove_committed_asset_only_clears_display() {
    let storage = Arc::new(RecordingStorage::new());
    let mut uploads = manager(&storage, "https://cdn/x.png");

    uploads.remove().await;

    assert_eq!(uploads.current_url(), None);
    assert_eq!(storage.call_count(), 0);
}

#[tokio::test]
async fn test_storage_unavailable_suggests_manual_entry() {
    let storage = Arc::new(RecordingStorage::new().failing_presign(503));
    let listener = Arc::new(RecordingListener::new());
    let mut uploads = manager(&storage, "https://cdn/x.png").with_listener(listener.clone());

    let result = uploads.select_file(png("a.png")).await;

    assert!(matches!(
        result,
        Err(UploadError::Authorization {
            status: Some(503),
            ..
        })
    ));
    assert_eq!(storage.put_count(), 0);
    assert_eq!(uploads.state(), UploadState::Idle);
    assert_eq!(uploads.current_url(), Some("https://cdn/x.png"));
    assert!(listener.errors()[0].contains("manually"));
}

#[tokio::test]
async fn test_manual_url_fallback() {
    let storage = Arc::new(RecordingStorage::new().returning(["https://cdn/a.png"]));
    let mut uploads = manager(&storage, "");

    uploads.select_file(png("a.png")).await.unwrap();
    uploads
        .set_manual_url(" https://images.example/dr-rao.jpg ")
        .await;

    assert_eq!(storage.deletes(), vec!["https://cdn/a.png".to_string()]);
    assert_eq!(uploads.current_url(), Some("https://images.example/dr-rao.jpg"));

    uploads.discard_session().await;
    assert_eq!(storage.deletes().len(), 1);
}

#[tokio::test]
async fn test_transfer_failure_returns_to_idle() {
    let storage = Arc::new(RecordingStorage::new().failing_put(500));
    let listener = Arc::new(RecordingListener::new());
    let mut uploads = manager(&storage, "").with_listener(listener.clone());

    let result = uploads.select_file(png("a.png")).await;

    assert!(matches!(result, Err(UploadError::Transfer(_))));
    assert_eq!(uploads.state(), UploadState::Idle);
    assert_eq!(uploads.session().session_url(), "");
    assert_eq!(
        listener.errors(),
        vec!["Upload failed, please try again.".to_string()]
    );

    // No partial upload is tracked, so nothing is deleted on discard.
    uploads.discard_session().await;
    assert!(storage.deletes().is_empty());
}

#[tokio::test]
async fn test_cleanup_failure_is_not_surfaced() {
    let storage = Arc::new(
        RecordingStorage::new()
            .returning(["https://cdn/y.png"])
            .failing_delete(500),
    );
    let listener = Arc::new(RecordingListener::new());
    let mut uploads = manager(&storage, "").with_listener(listener.clone());

    uploads.select_file(png("y.png")).await.unwrap();
    uploads.discard_session().await;
    uploads.discard_session().await;

    assert_eq!(storage.deletes(), vec!["https://cdn/y.png".to_string()]);
    assert!(listener.errors().is_empty());
    assert!(
        !listener
            .events()
            .iter()
            .any(|e| matches!(e, ListenerEvent::Error(_)))
    );
}

#[tokio::test]
async fn test_commit_then_discard_deletes_nothing() {
    let storage = Arc::new(RecordingStorage::new().returning(["https://cdn/z.png"]));
    let mut uploads = manager(&storage, "");

    uploads.select_file(png("z.png")).await.unwrap();
    assert_eq!(uploads.commit().as_deref(), Some("https://cdn/z.png"));
    uploads.discard_session().await;

    assert!(storage.deletes().is_empty());
    assert_eq!(uploads.session().committed_url(), "https://cdn/z.png");
}
