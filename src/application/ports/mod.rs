//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod clipboard;
pub mod config;
pub mod notifier;
pub mod panel;
pub mod paste;

// Re-export common types
pub use clipboard::{ClipboardError, SystemClipboard};
pub use config::ConfigStore;
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use panel::Panel;
pub use paste::{PasteError, PasteSynthesizer};
