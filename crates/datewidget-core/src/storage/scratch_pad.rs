//! The SAP scratch pad: one free-text field persisted under a fixed key.

use super::prefs::PrefsStore;
use crate::error::StorageError;

pub const PREFS_NAMESPACE: &str = "SAPPrefs";
pub const SCRATCH_PAD_KEY: &str = "ScratchPadText";

/// Scratch pad text bound to a preference store.
///
/// Loaded once by [`ScratchPad::load`]; every [`ScratchPad::edit`]
/// overwrites the stored value.
#[derive(Debug)]
pub struct ScratchPad<P: PrefsStore> {
    prefs: P,
    text: String,
}

impl<P: PrefsStore> ScratchPad<P> {
    /// Load the saved text. A missing value loads as the empty string.
    pub fn load(prefs: P) -> Result<Self, StorageError> {
        let text = prefs
            .get_string(PREFS_NAMESPACE, SCRATCH_PAD_KEY)?
            .unwrap_or_default();
        tracing::debug!(len = text.len(), "scratch pad loaded");
        Ok(Self { prefs, text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text and persist it.
    ///
    /// The in-memory text is updated even if the write fails.
    pub fn edit(&mut self, text: impl Into<String>) -> Result<(), StorageError> {
        self.text = text.into();
        self.prefs
            .put_string(PREFS_NAMESPACE, SCRATCH_PAD_KEY, &self.text)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.edit(String::new())
    }

    /// Give back the underlying store.
    pub fn into_prefs(self) -> P {
        self.prefs
    }
}
