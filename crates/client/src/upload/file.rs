//! Local file handles.

use std::path::Path;

use tokio::fs;
use tracing::debug;

/// A file picked by the user, held in memory until uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct LocalFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Read a file from disk and detect its MIME type.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        let content_type = detect_mime_type(&name, &bytes);

        debug!(path = ?path, size = bytes.len(), content_type = %content_type, "local file loaded");
        Ok(Self::new(name, content_type, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl std::fmt::Debug for LocalFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Sniff the MIME type from content, falling back to the extension.
pub fn detect_mime_type(filename: &str, bytes: &[u8]) -> String {
    infer::get(bytes)
        .map(|kind| kind.mime_type())
        .or_else(|| guess_mime_type(filename))
        .unwrap_or("application/octet-stream")
        .to_string()
}

fn guess_mime_type(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    let mime = match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn test_detect_from_content_wins_over_extension() {
        assert_eq!(detect_mime_type("photo.jpg", PNG_HEADER), "image/png");
    }

    #[test]
    fn test_detect_falls_back_to_extension() {
        assert_eq!(detect_mime_type("scan.PDF", b"plain"), "application/pdf");
        assert_eq!(detect_mime_type("photo.jpeg", b""), "image/jpeg");
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(
            detect_mime_type("notes", b"hello"),
            "application/octet-stream"
        );
    }

    #[tokio::test]
    async fn test_from_path() {
        let path = std::env::temp_dir().join(format!("physio-upload-{}.png", std::process::id()));
        tokio::fs::write(&path, PNG_HEADER).await.unwrap();

        let file = LocalFile::from_path(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(file.content_type(), "image/png");
        assert_eq!(file.size(), PNG_HEADER.len() as u64);
        assert!(file.name().ends_with(".png"));
    }
}
