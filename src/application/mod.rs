//! Application layer - Use cases and port interfaces
//!
//! Contains the buffer engine, the change poller, the hotkey command set,
//! and trait definitions for external system interactions.

pub mod engine;
pub mod hotkeys;
pub mod poller;
pub mod ports;

// Re-export use cases
pub use engine::{BufferEngine, CopyOutcome, EngineConfig, EngineError};
pub use hotkeys::{Disposition, HotkeyAction};
pub use poller::ChangePoller;
