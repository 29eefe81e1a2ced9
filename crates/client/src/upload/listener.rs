//! Callbacks from an upload field to the form that hosts it.

use std::fmt;

/// Upload control state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Validating,
    /// The file picker is disabled while a transfer is in flight.
    Uploading,
}

impl fmt::Display for UploadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadState::Idle => "idle",
            UploadState::Validating => "validating",
            UploadState::Uploading => "uploading",
        };
        f.write_str(name)
    }
}

/// Implemented by the form that owns an upload field.
pub trait AssetListener: Send + Sync {
    /// The field's value changed. Empty when the asset was removed.
    fn on_asset_changed(&self, url: &str);

    /// A user-facing error occurred.
    fn on_error(&self, message: &str);

    fn on_state_changed(&self, _state: UploadState) {}
}

/// Listener that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl AssetListener for NoopListener {
    fn on_asset_changed(&self, _url: &str) {}

    fn on_error(&self, _message: &str) {}
}
