//! Physio clinic client library.
//!
//! API access for the clinic backend, typed form payloads, and the upload
//! lifecycle that keeps unsaved uploads from leaking into storage.
//! The `physio-upload` binary drives the same code from the command line.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod forms;
pub mod upload;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, FormError, UploadError, ValidationError};
pub use upload::{LocalFile, UploadConstraints, UploadFolder, UploadManager};
