//! Client-side file checks run before anything touches the network.

use std::collections::BTreeSet;

use super::file::LocalFile;
use crate::error::ValidationError;

/// Default image size limit (5 MiB).
pub const DEFAULT_IMAGE_MAX_BYTES: u64 = 5 * 1024 * 1024;

/// Default document size limit (10 MiB).
pub const DEFAULT_DOCUMENT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Image types accepted by profile, service and blog image fields.
pub const IMAGE_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Types accepted by onboarding certificate fields.
pub const DOCUMENT_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/gif",
    "application/pdf",
];

/// Accepted MIME types and size limit for one upload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConstraints {
    accepted_mime_types: BTreeSet<String>,
    max_size_bytes: u64,
}

impl UploadConstraints {
    pub fn new<I, S>(accepted_mime_types: I, max_size_bytes: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            accepted_mime_types: accepted_mime_types
                .into_iter()
                .map(|m| normalize_mime(m.as_ref()))
                .collect(),
            max_size_bytes,
        }
    }

    pub fn images() -> Self {
        Self::new(IMAGE_MIME_TYPES, DEFAULT_IMAGE_MAX_BYTES)
    }

    pub fn documents() -> Self {
        Self::new(DOCUMENT_MIME_TYPES, DEFAULT_DOCUMENT_MAX_BYTES)
    }

    pub fn with_max_size(mut self, max_size_bytes: u64) -> Self {
        self.max_size_bytes = max_size_bytes;
        self
    }

    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_bytes
    }

    pub fn accepted_mime_types(&self) -> impl Iterator<Item = &str> {
        self.accepted_mime_types.iter().map(String::as_str)
    }

    /// Whether `mime` is accepted. Case and parameters are ignored.
    pub fn accepts(&self, mime: &str) -> bool {
        self.accepted_mime_types.contains(&normalize_mime(mime))
    }

    /// Short list of accepted types for messages, e.g. "GIF, JPEG, PNG".
    pub fn accepted_description(&self) -> String {
        self.accepted_mime_types
            .iter()
            .map(|m| describe_mime(m))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check type membership, then size.
    pub fn validate(&self, file: &LocalFile) -> Result<(), ValidationError> {
        if !self.accepts(file.content_type()) {
            return Err(ValidationError::UnsupportedType {
                actual: file.content_type().to_string(),
                accepted: self.accepted_description(),
            });
        }

        if file.size() > self.max_size_bytes {
            return Err(ValidationError::TooLarge {
                size: file.size(),
                limit: self.max_size_bytes,
            });
        }

        Ok(())
    }
}

fn normalize_mime(mime: &str) -> String {
    mime.split(';').next().unwrap_or(mime).trim().to_lowercase()
}

fn describe_mime(mime: &str) -> String {
    let subtype = mime.rsplit('/').next().unwrap_or(mime);
    match subtype {
        "jpeg" => "JPEG".to_string(),
        "webp" => "WebP".to_string(),
        "svg+xml" => "SVG".to_string(),
        other => other.to_uppercase(),
    }
}
