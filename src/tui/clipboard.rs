//! System clipboard access for "Copiar" actions
//!
//! Uses the `arboard` crate for cross-platform support. The handle is kept
//! alive between copies: on X11 the copied text disappears once the owning
//! `Clipboard` is dropped. A failed write discards the handle so the next
//! copy starts with a fresh one.

use anyhow::{Context, Result};
use arboard::Clipboard;
use std::sync::{Arc, Mutex};

/// Clipboard shared by the worker's blocking tasks
pub type SharedClipboard = Arc<Mutex<SystemClipboard>>;

#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    pub fn shared() -> SharedClipboard {
        Arc::new(Mutex::new(Self::default()))
    }

    /// Copy text, opening the clipboard on first use
    ///
    /// Common failure cases: no display server (headless Linux), permission denied.
    pub fn copy(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.inner.as_mut() {
            Some(clipboard) => clipboard,
            None => self
                .inner
                .insert(Clipboard::new().context("Failed to access clipboard")?),
        };

        if let Err(e) = clipboard.set_text(text) {
            self.inner = None;
            return Err(e).context("Failed to set clipboard text");
        }
        Ok(())
    }
}

/// Copy through a shared handle; a poisoned lock is recovered
pub fn copy_shared(clipboard: &SharedClipboard, text: &str) -> Result<()> {
    let mut guard = clipboard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.copy(text)
}
