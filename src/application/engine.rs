//! Buffer engine use case
//!
//! Single serialized owner of the paste buffer. Every mutation path
//! (poller-observed copies, hotkey dispatch, panel commands) goes through
//! the engine's mutex so index-based operations never interleave. Observers
//! subscribe to a level-triggered broadcast channel carrying no payload and
//! re-fetch the buffer snapshot on receipt.

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

use crate::domain::activity::ActivityTracker;
use crate::domain::buffer::PasteBuffer;

use super::ports::{ClipboardError, Panel, PasteError, PasteSynthesizer, SystemClipboard};

/// Errors from the buffer engine
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("Paste synthesis error: {0}")]
    Paste(#[from] PasteError),
}

/// What happened to an observed clipboard change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Appended to the buffer as a genuine user copy
    Appended,
    /// Consumed by the one-shot suppression flag (our own write-back)
    Suppressed,
    /// Not attributable to recent user input, dropped
    Dropped,
    /// The clipboard held no text, silently ignored
    Ignored,
}

/// Engine tunables
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Buffer size at which the panel auto-surfaces
    pub display_threshold: usize,
    /// Window after the last real user input within which an observed
    /// change counts as a genuine user copy
    pub activity_window: Duration,
    /// Drop changes not attributable to recent user input. Requires a
    /// wired user-input source; without one every change would drop, so
    /// compositions without an input monitor run lenient.
    pub strict_classification: bool,
    /// Clipboard inactivity before the buffer auto-resets
    pub idle_timeout: Duration,
    /// Panel close delay when the buffer was already empty
    pub close_delay_empty: Duration,
    /// Panel close delay when the buffer held items (longer, so the user
    /// sees what emptied it)
    pub close_delay_nonempty: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display_threshold: 2,
            activity_window: Duration::from_secs(1),
            strict_classification: true,
            idle_timeout: Duration::from_secs(90),
            close_delay_empty: Duration::from_millis(200),
            close_delay_nonempty: Duration::from_secs(1),
        }
    }
}

/// Buffer engine use case.
///
/// A dispatch is one logical unit executed under the buffer lock: remove
/// the item, push it onto the paste history, arm append suppression, write
/// the clipboard, synthesize the paste chord. No other engine-driven
/// clipboard write can interleave.
pub struct BufferEngine<C, P, S>
where
    C: SystemClipboard,
    P: PasteSynthesizer,
    S: Panel + 'static,
{
    clipboard: Arc<C>,
    paster: P,
    panel: Arc<S>,
    buffer: Mutex<PasteBuffer>,
    activity: Arc<ActivityTracker>,
    changes: broadcast::Sender<()>,
    close_task: StdMutex<Option<JoinHandle<()>>>,
    config: EngineConfig,
}

impl<C, P, S> BufferEngine<C, P, S>
where
    C: SystemClipboard,
    P: PasteSynthesizer,
    S: Panel + 'static,
{
    /// Create a new engine instance
    pub fn new(
        clipboard: Arc<C>,
        paster: P,
        panel: Arc<S>,
        activity: Arc<ActivityTracker>,
        config: EngineConfig,
    ) -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            clipboard,
            paster,
            panel,
            buffer: Mutex::new(PasteBuffer::new()),
            activity,
            changes,
            close_task: StdMutex::new(None),
            config,
        }
    }

    /// Subscribe to buffer-change notifications. Receivers get an empty
    /// signal and pull the current state via `items()`.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }

    /// Owned snapshot of the buffered items in dispatch order
    pub async fn items(&self) -> Vec<String> {
        self.buffer.lock().await.snapshot()
    }

    /// Number of buffered items
    pub async fn len(&self) -> usize {
        self.buffer.lock().await.len()
    }

    /// Number of items in the paste history
    pub async fn history_len(&self) -> usize {
        self.buffer.lock().await.history_len()
    }

    fn notify_changed(&self) {
        // No receivers is fine; nobody is looking yet
        let _ = self.changes.send(());
    }

    /// Ingest an observed clipboard change. Called by the change poller
    /// after a counter bump; `text` is None when the clipboard held no
    /// text, which is ignored without error.
    pub async fn observe_clipboard(&self, text: Option<String>) -> CopyOutcome {
        self.activity.touch_change();

        let Some(text) = text else {
            return CopyOutcome::Ignored;
        };

        let mut buffer = self.buffer.lock().await;
        // An armed flag proves the change was our own write-back, no
        // matter how late the sample lands relative to the activity clock
        if buffer.consume_suppression() {
            return CopyOutcome::Suppressed;
        }

        if self.config.strict_classification
            && !self.activity.is_user_originated(self.config.activity_window)
        {
            return CopyOutcome::Dropped;
        }

        buffer.append(text);
        let len = buffer.len();
        drop(buffer);

        // A fresh capture outranks any pending close
        self.cancel_scheduled_close();
        self.notify_changed();

        if len >= self.config.display_threshold {
            self.panel.show().await;
        }

        CopyOutcome::Appended
    }

    /// Dispatch the front item: clipboard write plus synthesized paste
    /// chord. Returns Ok(false) on an empty buffer.
    pub async fn paste_sequential(&self) -> Result<bool, EngineError> {
        let mut buffer = self.buffer.lock().await;
        let Some(item) = buffer.pop_front_for_paste() else {
            return Ok(false);
        };
        let emptied = buffer.is_empty();
        self.dispatch(&item).await?;
        drop(buffer);

        self.notify_changed();
        if emptied {
            self.schedule_close(self.config.close_delay_nonempty);
        }
        Ok(true)
    }

    /// Dispatch the back item (LIFO relative to capture order)
    pub async fn paste_reverse(&self) -> Result<bool, EngineError> {
        let mut buffer = self.buffer.lock().await;
        let Some(item) = buffer.pop_back_for_paste() else {
            return Ok(false);
        };
        let emptied = buffer.is_empty();
        self.dispatch(&item).await?;
        drop(buffer);

        self.notify_changed();
        if emptied {
            self.schedule_close(self.config.close_delay_nonempty);
        }
        Ok(true)
    }

    /// Dispatch the item at `index`, clamped to the last index
    pub async fn paste_nth(&self, index: usize) -> Result<bool, EngineError> {
        let mut buffer = self.buffer.lock().await;
        let Some(item) = buffer.pop_nth_for_paste(index) else {
            return Ok(false);
        };
        let emptied = buffer.is_empty();
        self.dispatch(&item).await?;
        drop(buffer);

        self.notify_changed();
        if emptied {
            self.schedule_close(self.config.close_delay_nonempty);
        }
        Ok(true)
    }

    async fn dispatch(&self, item: &str) -> Result<(), EngineError> {
        self.clipboard.write_text(item).await?;
        self.paster.send_paste_chord().await?;
        Ok(())
    }

    /// Write the item at `index` to the clipboard without removing it
    /// from the buffer (preview copy)
    pub async fn copy_item(&self, index: usize) -> Result<bool, EngineError> {
        let mut buffer = self.buffer.lock().await;
        let Some(item) = buffer.item(index).map(str::to_owned) else {
            return Ok(false);
        };
        buffer.suppress_next_append();
        self.clipboard.write_text(&item).await?;
        Ok(true)
    }

    /// Pop the most recently dispatched item off the paste history and
    /// re-insert it at buffer index 0
    pub async fn restore(&self) -> bool {
        let restored = self.buffer.lock().await.restore();
        if restored {
            self.cancel_scheduled_close();
            self.notify_changed();
        }
        restored
    }

    /// Remove one item. No-op out of range; schedules a panel close when
    /// the buffer becomes empty.
    pub async fn delete_item(&self, index: usize) -> bool {
        let mut buffer = self.buffer.lock().await;
        if !buffer.delete_item(index) {
            return false;
        }
        let emptied = buffer.is_empty();
        drop(buffer);

        self.notify_changed();
        if emptied {
            self.schedule_close(self.config.close_delay_nonempty);
        }
        true
    }

    /// Remove the front item, if any
    pub async fn pop_front(&self) -> bool {
        self.delete_item(0).await
    }

    /// Remove the back item, if any
    pub async fn pop_back(&self) -> bool {
        let mut buffer = self.buffer.lock().await;
        if !buffer.delete_back() {
            return false;
        }
        let emptied = buffer.is_empty();
        drop(buffer);

        self.notify_changed();
        if emptied {
            self.schedule_close(self.config.close_delay_nonempty);
        }
        true
    }

    /// Insert a copy of the item at `index` immediately after it
    pub async fn duplicate_item(&self, index: usize) -> bool {
        let changed = self.buffer.lock().await.duplicate_item(index);
        if changed {
            self.notify_changed();
        }
        changed
    }

    /// Remove-then-insert reorder; no-op when indices match or are out
    /// of range
    pub async fn move_item(&self, from: usize, to: usize) -> bool {
        let changed = self.buffer.lock().await.move_item(from, to);
        if changed {
            self.notify_changed();
        }
        changed
    }

    /// Replace the text at `index` in place (inline edit)
    pub async fn update_item(&self, index: usize, new_value: String) -> bool {
        let changed = self.buffer.lock().await.update_item(index, new_value);
        if changed {
            self.notify_changed();
        }
        changed
    }

    /// Collapse the whole buffer into one item joined by `separator`
    pub async fn join_items(&self, separator: &str) -> bool {
        let changed = self.buffer.lock().await.join_items(separator);
        if changed {
            self.notify_changed();
        }
        changed
    }

    /// Clear buffer, paste history, and suppression state
    pub async fn reset(&self) {
        self.buffer.lock().await.reset();
        self.notify_changed();
    }

    /// Reset and close the panel, with a longer close delay when the
    /// buffer held items so the user sees what emptied it.
    /// Returns the buffer size before the reset.
    pub async fn reset_and_close(&self) -> usize {
        let mut buffer = self.buffer.lock().await;
        let count = buffer.len();
        buffer.reset();
        drop(buffer);

        self.notify_changed();
        let delay = if count > 0 {
            self.config.close_delay_nonempty
        } else {
            self.config.close_delay_empty
        };
        self.schedule_close(delay);
        count
    }

    /// Surface the panel if closed, close it if open
    pub async fn toggle_panel(&self) {
        if self.panel.is_open() {
            self.cancel_scheduled_close();
            self.panel.close().await;
        } else {
            self.panel.show().await;
        }
    }

    /// Idle-expiry safety valve: full reset once the clipboard has been
    /// quiet past the timeout and the panel is closed. Returns true when
    /// a reset was performed.
    pub async fn expire_if_idle(&self) -> bool {
        if !self.activity.is_idle_for(self.config.idle_timeout) {
            return false;
        }
        if self.panel.is_open() {
            return false;
        }

        let mut buffer = self.buffer.lock().await;
        if buffer.is_empty() && buffer.history_len() == 0 {
            return false;
        }
        buffer.reset();
        drop(buffer);

        self.notify_changed();
        true
    }

    fn schedule_close(&self, delay: Duration) {
        let panel = Arc::clone(&self.panel);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            panel.close().await;
        });

        let mut slot = self.close_task.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = slot.replace(task) {
            previous.abort();
        }
    }

    fn cancel_scheduled_close(&self) {
        let mut slot = self.close_task.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(task) = slot.take() {
            task.abort();
        }
    }
}
