//! Global hotkey adapters

pub mod global;

pub use global::{EscapeRegistration, GlobalHotkeyListener, HotkeyError};
