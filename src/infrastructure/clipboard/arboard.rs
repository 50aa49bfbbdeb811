//! Cross-platform clipboard adapter using arboard
//!
//! Works on Windows, macOS, and Linux (X11/Wayland). arboard exposes no
//! platform change counter, so this adapter derives one by comparing
//! successive reads: the counter bumps whenever the observed text differs
//! from the last observation, and on every write of our own.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{ClipboardError, SystemClipboard};

#[derive(Default)]
struct CounterState {
    count: u64,
    last_text: Option<String>,
}

/// Cross-platform clipboard adapter using arboard
pub struct ArboardClipboard {
    state: Mutex<CounterState>,
}

impl ArboardClipboard {
    /// Create a new arboard clipboard adapter
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CounterState::default()),
        }
    }

    async fn fetch_text() -> Result<Option<String>, ClipboardError> {
        // arboard operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(|| {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;

            match clipboard.get_text() {
                Ok(text) => Ok(Some(text)),
                // Non-text contents (image, files) are not an error
                Err(arboard::Error::ContentNotAvailable) => Ok(None),
                Err(e) => Err(ClipboardError::ReadFailed(e.to_string())),
            }
        })
        .await
        .map_err(|e| ClipboardError::ReadFailed(format!("Task join error: {}", e)))?
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, CounterState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for ArboardClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemClipboard for ArboardClipboard {
    async fn change_count(&self) -> Result<u64, ClipboardError> {
        let text = Self::fetch_text().await?;
        let mut state = self.lock_state();
        if state.last_text != text {
            state.count += 1;
            state.last_text = text;
        }
        Ok(state.count)
    }

    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        Self::fetch_text().await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let owned = text.to_owned();

        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::ClipboardUnavailable(e.to_string()))?;

            clipboard
                .set_text(&owned)
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::WriteFailed(format!("Task join error: {}", e)))??;

        // Record our own write so the next sample sees exactly one bump
        let mut state = self.lock_state();
        state.count += 1;
        state.last_text = Some(text.to_owned());
        Ok(())
    }
}
