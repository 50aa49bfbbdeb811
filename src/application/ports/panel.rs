//! Panel port interface
//!
//! The floating panel itself is presentation; the engine only needs to
//! surface it, close it, and ask whether it is open (idle expiry skips a
//! reset while the user is looking at the buffer).

use async_trait::async_trait;

/// Port for the buffer panel
#[async_trait]
pub trait Panel: Send + Sync {
    /// Surface the panel
    async fn show(&self);

    /// Close the panel
    async fn close(&self);

    /// Whether the panel is currently open
    fn is_open(&self) -> bool;
}
