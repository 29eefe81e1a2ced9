//! File upload lifecycle.
//!
//! Provides validation, presigned uploads, and cleanup of uploads that were
//! never saved.

pub mod constraints;
pub mod file;
pub mod folder;
pub mod listener;
pub mod manager;
pub mod session;
pub mod transfer;

pub use constraints::{
    DEFAULT_DOCUMENT_MAX_BYTES, DEFAULT_IMAGE_MAX_BYTES, DOCUMENT_MIME_TYPES, IMAGE_MIME_TYPES,
    UploadConstraints,
};
pub use file::{LocalFile, detect_mime_type};
pub use folder::UploadFolder;
pub use listener::{AssetListener, NoopListener, UploadState};
pub use manager::UploadManager;
pub use session::UploadSession;
pub use transfer::upload;
