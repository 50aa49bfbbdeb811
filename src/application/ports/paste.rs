//! Paste synthesis port interface

use async_trait::async_trait;
use thiserror::Error;

/// Paste synthesis errors
#[derive(Debug, Clone, Error)]
pub enum PasteError {
    #[error("Input synthesis permission denied: {0}")]
    PermissionDenied(String),

    #[error("Failed to synthesize paste chord: {0}")]
    SynthesisFailed(String),
}

/// Port for synthesizing the platform paste keystroke.
///
/// The focused application receives the chord as if the user had pressed
/// it; the text to paste must already be on the clipboard.
#[async_trait]
pub trait PasteSynthesizer: Send + Sync {
    /// Emit the platform paste chord into the OS input stream
    async fn send_paste_chord(&self) -> Result<(), PasteError>;
}
