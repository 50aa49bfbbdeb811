//! System clipboard port interface

use async_trait::async_trait;
use thiserror::Error;

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to write clipboard: {0}")]
    WriteFailed(String),
}

/// Port for the system clipboard.
///
/// The platform exposes no change-notification event for the generic text
/// slot; callers poll `change_count` and re-read on a bump.
#[async_trait]
pub trait SystemClipboard: Send + Sync {
    /// Current value of the monotonically increasing change counter.
    /// Bumps at least once for every clipboard write, ours included.
    async fn change_count(&self) -> Result<u64, ClipboardError>;

    /// Read the plain-text clipboard slot. Ok(None) when the clipboard
    /// holds no text (unsupported content type), which is not an error.
    async fn read_text(&self) -> Result<Option<String>, ClipboardError>;

    /// Replace the clipboard contents with `text`
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Blanket implementation for boxed clipboard types
#[async_trait]
impl SystemClipboard for Box<dyn SystemClipboard> {
    async fn change_count(&self) -> Result<u64, ClipboardError> {
        self.as_ref().change_count().await
    }

    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        self.as_ref().read_text().await
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.as_ref().write_text(text).await
    }
}
