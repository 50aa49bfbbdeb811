//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the system clipboard, input synthesis, global
//! hotkeys, and desktop notifications.

pub mod clipboard;
pub mod config;
pub mod hotkey;
pub mod input;
pub mod notification;
pub mod panel;

// Re-export adapters
pub use clipboard::ArboardClipboard;
pub use config::XdgConfigStore;
pub use hotkey::{EscapeRegistration, GlobalHotkeyListener, HotkeyError};
pub use input::EnigoPasteSynthesizer;
pub use notification::NotifyRustNotifier;
pub use panel::TerminalPanel;
