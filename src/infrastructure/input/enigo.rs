//! Cross-platform paste synthesis adapter using enigo
//!
//! Emits the platform paste chord (Cmd+V on macOS, Ctrl+V elsewhere) as
//! low-level key events, so the focused application receives a paste as if
//! the user had pressed it.

use async_trait::async_trait;

use crate::application::ports::{PasteError, PasteSynthesizer};

/// Cross-platform paste chord synthesizer using enigo
pub struct EnigoPasteSynthesizer;

impl EnigoPasteSynthesizer {
    /// Create a new enigo paste synthesizer
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnigoPasteSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteSynthesizer for EnigoPasteSynthesizer {
    async fn send_paste_chord(&self) -> Result<(), PasteError> {
        // enigo operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            use enigo::{Direction, Enigo, Key, Keyboard, Settings};

            let mut enigo = Enigo::new(&Settings::default()).map_err(|e| {
                PasteError::PermissionDenied(format!("Failed to create enigo: {}", e))
            })?;

            #[cfg(target_os = "macos")]
            let modifier = Key::Meta;
            #[cfg(not(target_os = "macos"))]
            let modifier = Key::Control;

            enigo
                .key(modifier, Direction::Press)
                .and_then(|_| enigo.key(Key::Unicode('v'), Direction::Click))
                .and_then(|_| enigo.key(modifier, Direction::Release))
                .map_err(|e| PasteError::SynthesisFailed(format!("Failed to send chord: {}", e)))
        })
        .await
        .map_err(|e| PasteError::SynthesisFailed(format!("Task join error: {}", e)))?
    }
}
