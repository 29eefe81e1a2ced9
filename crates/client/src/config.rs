//! Configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::upload::{DEFAULT_IMAGE_MAX_BYTES, UploadConstraints};

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (default: http://localhost:8000/api).
    pub api_url: String,

    /// Bearer token for backend requests.
    pub api_token: Option<String>,

    /// Request timeout. Unset means no client-side timeout.
    pub http_timeout: Option<Duration>,

    /// Size limit for image uploads (default: 5 MiB).
    pub upload_max_bytes: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url =
            lookup("PHYSIO_API_URL").unwrap_or_else(|| "http://localhost:8000/api".to_string());

        let api_token = lookup("PHYSIO_API_TOKEN").filter(|t| !t.trim().is_empty());

        let http_timeout = lookup("PHYSIO_HTTP_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("PHYSIO_HTTP_TIMEOUT_SECS must be a whole number of seconds")?
            .map(Duration::from_secs);

        let upload_max_bytes = lookup("PHYSIO_UPLOAD_MAX_BYTES")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("PHYSIO_UPLOAD_MAX_BYTES must be a valid u64")?
            .unwrap_or(DEFAULT_IMAGE_MAX_BYTES);

        Ok(Self {
            api_url,
            api_token,
            http_timeout,
            upload_max_bytes,
        })
    }

    /// Image constraints with the configured size limit.
    pub fn image_constraints(&self) -> UploadConstraints {
        UploadConstraints::images().with_max_size(self.upload_max_bytes)
    }
}
