//! Clipboard change poller
//!
//! The platform offers no change event for the text clipboard; the standard
//! technique is sampling a monotonic change counter on a fixed interval.
//! The first sample establishes a baseline so clipboard contents that
//! predate startup are not ingested.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};

use super::engine::{BufferEngine, CopyOutcome};
use super::ports::{Notifier, NotificationIcon, Panel, PasteSynthesizer, SystemClipboard};

/// Polls the clipboard change counter and feeds accepted changes into the
/// buffer engine.
pub struct ChangePoller<C, P, S, N>
where
    C: SystemClipboard,
    P: PasteSynthesizer,
    S: Panel + 'static,
    N: Notifier,
{
    clipboard: Arc<C>,
    engine: Arc<BufferEngine<C, P, S>>,
    notifier: Option<N>,
    poll_interval: Duration,
    last_count: Option<u64>,
}

impl<C, P, S, N> ChangePoller<C, P, S, N>
where
    C: SystemClipboard,
    P: PasteSynthesizer,
    S: Panel + 'static,
    N: Notifier,
{
    /// Create a poller. `notifier` is the optional per-copy feedback
    /// channel; pass None to capture silently.
    pub fn new(
        clipboard: Arc<C>,
        engine: Arc<BufferEngine<C, P, S>>,
        notifier: Option<N>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            clipboard,
            engine,
            notifier,
            poll_interval,
            last_count: None,
        }
    }

    /// Sample the change counter once. Errors from the clipboard port
    /// degrade to a skipped sample; nothing on this path is fatal.
    pub async fn tick(&mut self) -> Option<CopyOutcome> {
        let count = match self.clipboard.change_count().await {
            Ok(count) => count,
            Err(_) => return None,
        };

        if self.last_count == Some(count) {
            return None;
        }
        let baseline = self.last_count.is_none();
        self.last_count = Some(count);
        if baseline {
            return None;
        }

        let text = self.clipboard.read_text().await.unwrap_or(None);
        let outcome = self.engine.observe_clipboard(text).await;

        if outcome == CopyOutcome::Appended {
            if let Some(notifier) = &self.notifier {
                let _ = notifier
                    .notify("PasteDeck", "Copy captured", NotificationIcon::Info)
                    .await;
            }
        }

        Some(outcome)
    }

    /// Run the poll loop until the task is dropped
    pub async fn run(mut self) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }
}
