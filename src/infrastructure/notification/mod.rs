//! Notification adapters

pub mod notify_rust;

pub use self::notify_rust::NotifyRustNotifier;
