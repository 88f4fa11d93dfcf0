//! Cross-platform clipboard facade.
//!
//! Thin wrapper around `arboard` so callers (the notes editor, mainly) never
//! touch platform clipboard backends directly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
}

/// Read the clipboard as text.
pub fn get() -> Result<String, ClipboardError> {
    let mut cb = arboard::Clipboard::new()?;
    cb.get_text().map_err(ClipboardError::from)
}

/// Replace the clipboard contents with `text`.
pub fn set(text: &str) -> Result<(), ClipboardError> {
    let mut cb = arboard::Clipboard::new()?;
    cb.set_text(text.to_owned()).map_err(ClipboardError::from)
}

/// Whether a clipboard backend can be initialized at all (headless hosts
/// often have none).
pub fn available() -> bool {
    arboard::Clipboard::new().is_ok()
}
