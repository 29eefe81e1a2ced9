//! Client error types.

use thiserror::Error;

/// Errors from talking to the clinic backend or the storage endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned status {status}")]
    Status {
        status: u16,
        /// `detail` from the error body, when the backend sent one.
        detail: Option<String>,
    },

    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Backend-provided detail message, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// Client-side file validation failures. Never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("file type {actual} is not accepted (accepted: {accepted})")]
    UnsupportedType { actual: String, accepted: String },

    #[error("file is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

impl ValidationError {
    /// Inline message naming the accepted types or the size limit.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::UnsupportedType { accepted, .. } => {
                format!("Please select a valid file ({accepted}).")
            }
            ValidationError::TooLarge { limit, .. } => {
                format!("File size must be at most {}.", format_size(*limit))
            }
        }
    }
}

/// Upload failures, split by the stage that failed.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The presigned-URL request was rejected or never answered.
    #[error("upload authorization failed")]
    Authorization {
        status: Option<u16>,
        #[source]
        source: ApiError,
    },

    /// The PUT to the storage endpoint failed.
    #[error("file transfer failed")]
    Transfer(#[source] ApiError),
}

impl UploadError {
    pub(crate) fn authorization(source: ApiError) -> Self {
        UploadError::Authorization {
            status: source.status(),
            source,
        }
    }

    /// Message suitable for showing next to the upload control.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Validation(e) => e.user_message(),
            UploadError::Authorization {
                status: Some(503), ..
            } => "File storage is not available right now. Please enter the image URL manually."
                .to_string(),
            UploadError::Authorization { .. } => {
                "Upload failed. You can try again or enter the image URL manually.".to_string()
            }
            UploadError::Transfer(_) => "Upload failed, please try again.".to_string(),
        }
    }
}

/// Form submission errors.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("save failed: {0}")]
    Api(#[from] ApiError),
}

/// Human-readable byte count ("5 MB", "512 KB", "1.5 MB").
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;

    let (value, unit) = if bytes >= MB {
        (bytes as f64 / MB as f64, "MB")
    } else if bytes >= KB {
        (bytes as f64 / KB as f64, "KB")
    } else {
        return format!("{bytes} bytes");
    };

    let formatted = format!("{value:.1}");
    let formatted = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("{formatted} {unit}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_size(1536 * 1024), "1.5 MB");
        assert_eq!(format_size(512 * 1024), "512 KB");
        assert_eq!(format_size(100), "100 bytes");
    }

    #[test]
    fn test_validation_messages() {
        let err = ValidationError::TooLarge {
            size: 6 * 1024 * 1024,
            limit: 5 * 1024 * 1024,
        };
        assert_eq!(err.user_message(), "File size must be at most 5 MB.");

        let err = ValidationError::UnsupportedType {
            actual: "application/zip".to_string(),
            accepted: "JPEG, PNG".to_string(),
        };
        assert_eq!(err.user_message(), "Please select a valid file (JPEG, PNG).");
    }

    #[test]
    fn test_authorization_503_suggests_manual_entry() {
        let err = UploadError::authorization(ApiError::Status {
            status: 503,
            detail: Some("storage not configured".to_string()),
        });
        assert!(matches!(
            err,
            UploadError::Authorization {
                status: Some(503),
                ..
            }
        ));
        assert!(err.user_message().contains("manually"));
    }

    #[test]
    fn test_transfer_message() {
        let err = UploadError::Transfer(ApiError::Status {
            status: 500,
            detail: None,
        });
        assert_eq!(err.user_message(), "Upload failed, please try again.");
    }

    #[test]
    fn test_missing_fields_display() {
        let err = FormError::MissingFields(vec!["name", "specialization"]);
        assert_eq!(
            err.to_string(),
            "missing required fields: name, specialization"
        );
    }
}
