//! Upload session bookkeeping.
//!
//! Tracks which asset URL is committed on the owning entity and which one
//! was uploaded during the current edit. Every transition that leaves an
//! uploaded object unreferenced returns it as an orphan for the caller to
//! delete; the session itself performs no I/O.

/// Committed, session and displayed URLs for one image field.
///
/// Invariant: a non-empty `session_url` is always the displayed value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSession {
    committed_url: String,
    session_url: String,
    displayed_url: String,
    discarded: bool,
}

impl UploadSession {
    /// Begin an edit. `committed_url` is empty for a new entity.
    pub fn open(committed_url: impl Into<String>) -> Self {
        let committed_url = committed_url.into();
        Self {
            displayed_url: committed_url.clone(),
            committed_url,
            session_url: String::new(),
            discarded: false,
        }
    }

    pub fn committed_url(&self) -> &str {
        &self.committed_url
    }

    pub fn session_url(&self) -> &str {
        &self.session_url
    }

    pub fn displayed_url(&self) -> &str {
        &self.displayed_url
    }

    pub fn has_asset(&self) -> bool {
        !self.displayed_url.is_empty()
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded
    }

    /// Record a completed upload. Returns the replaced session upload.
    pub fn record_upload(&mut self, file_url: impl Into<String>) -> Option<String> {
        let file_url = file_url.into();
        let orphan = self
            .take_orphan()
            .filter(|previous| *previous != file_url);

        self.session_url = file_url.clone();
        self.displayed_url = file_url;
        self.discarded = false;
        orphan
    }

    /// Show a manually entered URL. Returns the replaced session upload.
    ///
    /// Entering the session upload's own URL keeps it as the session upload.
    pub fn set_manual(&mut self, url: impl Into<String>) -> Option<String> {
        let url = url.into();
        if !self.session_url.is_empty() && url == self.session_url {
            self.displayed_url = url;
            self.discarded = false;
            return None;
        }

        let orphan = self.take_orphan().filter(|previous| *previous != url);

        self.displayed_url = url;
        self.discarded = false;
        orphan
    }

    /// Clear the displayed value.
    ///
    /// Removing this session's own upload returns it for deletion. Removing
    /// the committed asset only clears the display; whether that removal is
    /// persisted is up to the form's commit.
    pub fn remove(&mut self) -> Option<String> {
        let orphan = if self.displayed_url == self.session_url {
            self.take_orphan()
        } else {
            None
        };

        self.displayed_url.clear();
        self.discarded = false;
        orphan
    }

    /// The owning entity was saved with the displayed value.
    ///
    /// Returns the new committed URL, or `None` when it is empty.
    pub fn commit(&mut self) -> Option<String> {
        self.committed_url = self.displayed_url.clone();
        self.session_url.clear();
        (!self.committed_url.is_empty()).then(|| self.committed_url.clone())
    }

    /// The edit was abandoned. Returns the session upload to delete, once.
    pub fn discard(&mut self) -> Option<String> {
        if self.discarded {
            return None;
        }
        self.discarded = true;

        let orphan = self.take_orphan();
        self.displayed_url = self.committed_url.clone();
        orphan
    }

    /// Take the session URL if it is an upload distinct from the committed one.
    fn take_orphan(&mut self) -> Option<String> {
        let session_url = std::mem::take(&mut self.session_url);
        (!session_url.is_empty() && session_url != self.committed_url).then_some(session_url)
    }
}
