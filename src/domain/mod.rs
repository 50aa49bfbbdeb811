//! Domain layer - Core business logic
//!
//! Contains the paste buffer entity, activity classification, and
//! configuration value objects. This layer has no dependencies on
//! external systems.

pub mod activity;
pub mod buffer;
pub mod config;
pub mod error;

// Re-export common types
pub use activity::ActivityTracker;
pub use buffer::PasteBuffer;
pub use config::AppConfig;
pub use error::*;
