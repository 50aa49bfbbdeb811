//! End-to-end engine scenarios against mock adapters
//!
//! Drives the public library surface the way the daemon does: a poller
//! sampling a scripted clipboard, hotkey actions applied through the
//! dispatch rules, and a panel observing open/close side effects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use pastedeck::application::hotkeys::{apply, HotkeyAction};
use pastedeck::application::ports::{
    ClipboardError, Panel, PasteError, PasteSynthesizer, SystemClipboard,
};
use pastedeck::application::{BufferEngine, ChangePoller, CopyOutcome, EngineConfig};
use pastedeck::domain::activity::ActivityTracker;

/// Clipboard double with a manual change counter, as a platform pasteboard
/// would expose one
#[derive(Default)]
struct FakeClipboard {
    state: Mutex<(u64, Option<String>)>,
}

impl FakeClipboard {
    fn user_copy(&self, text: &str) {
        let mut state = self.state.lock().unwrap();
        state.0 += 1;
        state.1 = Some(text.to_string());
    }

    fn current(&self) -> Option<String> {
        self.state.lock().unwrap().1.clone()
    }
}

#[async_trait]
impl SystemClipboard for FakeClipboard {
    async fn change_count(&self) -> Result<u64, ClipboardError> {
        Ok(self.state.lock().unwrap().0)
    }

    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        Ok(self.current())
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut state = self.state.lock().unwrap();
        state.0 += 1;
        state.1 = Some(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct ChordRecorder {
    chords: Mutex<Vec<String>>,
}

#[async_trait]
impl PasteSynthesizer for ChordRecorder {
    async fn send_paste_chord(&self) -> Result<(), PasteError> {
        self.chords.lock().unwrap().push("paste".to_string());
        Ok(())
    }
}

#[derive(Default)]
struct FakePanel {
    open: AtomicBool,
}

#[async_trait]
impl Panel for FakePanel {
    async fn show(&self) {
        self.open.store(true, Ordering::SeqCst);
    }

    async fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

/// Notifier type parameter placeholder for pollers without feedback
struct NoNotifier;

#[async_trait]
impl pastedeck::application::ports::Notifier for NoNotifier {
    async fn notify(
        &self,
        _title: &str,
        _message: &str,
        _icon: pastedeck::application::ports::NotificationIcon,
    ) -> Result<(), pastedeck::application::ports::NotificationError> {
        Ok(())
    }
}

type TestEngine = BufferEngine<FakeClipboard, ChordRecorder, FakePanel>;
type TestPoller = ChangePoller<FakeClipboard, ChordRecorder, FakePanel, NoNotifier>;

struct World {
    clipboard: Arc<FakeClipboard>,
    engine: Arc<TestEngine>,
    panel: Arc<FakePanel>,
    activity: Arc<ActivityTracker>,
    poller: TestPoller,
}

async fn world() -> World {
    let clipboard = Arc::new(FakeClipboard::default());
    let panel = Arc::new(FakePanel::default());
    let activity = Arc::new(ActivityTracker::new());
    let engine = Arc::new(BufferEngine::new(
        Arc::clone(&clipboard),
        ChordRecorder::default(),
        Arc::clone(&panel),
        Arc::clone(&activity),
        EngineConfig {
            close_delay_empty: Duration::ZERO,
            close_delay_nonempty: Duration::ZERO,
            ..EngineConfig::default()
        },
    ));
    let mut poller = ChangePoller::new(
        Arc::clone(&clipboard),
        Arc::clone(&engine),
        None,
        Duration::from_millis(100),
    );
    poller.tick().await; // baseline sample

    World {
        clipboard,
        engine,
        panel,
        activity,
        poller,
    }
}

impl World {
    /// Simulate a user copy: input event, pasteboard change, poll sample
    async fn copy(&mut self, text: &str) -> Option<CopyOutcome> {
        self.activity.touch_user_event();
        self.clipboard.user_copy(text);
        self.poller.tick().await
    }

    /// Apply a hotkey the way the event loop does
    async fn press(&mut self, action: HotkeyAction) {
        self.activity.touch_user_event();
        apply(&self.engine, action).await.unwrap();
    }
}

#[tokio::test]
async fn copies_accumulate_in_order() {
    let mut w = world().await;
    w.copy("first").await;
    w.copy("second").await;
    w.copy("third").await;

    assert_eq!(w.engine.items().await, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn panel_surfaces_at_display_threshold() {
    let mut w = world().await;
    w.copy("one").await;
    assert!(!w.panel.is_open());
    w.copy("two").await;
    assert!(w.panel.is_open());
}

#[tokio::test]
async fn sequential_hotkey_dispatches_fifo_and_skips_own_writeback() {
    let mut w = world().await;
    w.copy("a").await;
    w.copy("b").await;

    w.press(HotkeyAction::PasteSequential).await;
    assert_eq!(w.clipboard.current().as_deref(), Some("a"));

    // The dispatch write bumped the counter; the next poll sample must
    // consume the suppression flag instead of re-capturing "a"
    assert_eq!(w.poller.tick().await, Some(CopyOutcome::Suppressed));
    assert_eq!(w.engine.items().await, vec!["b"]);

    w.press(HotkeyAction::PasteSequential).await;
    assert_eq!(w.clipboard.current().as_deref(), Some("b"));
    assert_eq!(w.poller.tick().await, Some(CopyOutcome::Suppressed));
    assert!(w.engine.items().await.is_empty());
}

#[tokio::test]
async fn mixed_dispatch_orders_interleave_correctly() {
    let mut w = world().await;
    for text in ["a", "b", "c", "d"] {
        w.copy(text).await;
    }

    w.press(HotkeyAction::PasteReverse).await; // d
    w.poller.tick().await;
    w.press(HotkeyAction::PasteSequential).await; // a
    w.poller.tick().await;
    w.press(HotkeyAction::PasteNth(1)).await; // c
    w.poller.tick().await;

    assert_eq!(w.engine.items().await, vec!["b"]);
    assert_eq!(w.engine.history_len().await, 3);
}

#[tokio::test]
async fn indexed_paste_clamps_to_last_item() {
    let mut w = world().await;
    w.copy("a").await;
    w.copy("b").await;

    w.press(HotkeyAction::PasteNth(8)).await;
    assert_eq!(w.clipboard.current().as_deref(), Some("b"));
    assert_eq!(w.engine.items().await, vec!["a"]);
}

#[tokio::test]
async fn restore_reinserts_last_dispatched_at_front() {
    let mut w = world().await;
    w.copy("x").await;
    w.copy("y").await;

    w.press(HotkeyAction::PasteSequential).await; // dispatch "x"
    w.poller.tick().await;
    assert_eq!(w.engine.items().await, vec!["y"]);

    assert!(w.engine.restore().await);
    assert_eq!(w.engine.items().await, vec!["x", "y"]);
    assert_eq!(w.engine.history_len().await, 0);

    // Nothing left to restore
    assert!(!w.engine.restore().await);
}

#[tokio::test]
async fn join_collapses_buffer_then_dispatch_sends_joined_text() {
    let mut w = world().await;
    w.copy("a").await;
    w.copy("b").await;
    w.copy("c").await;

    assert!(w.engine.join_items("\n").await);
    assert_eq!(w.engine.items().await, vec!["a\nb\nc"]);

    w.press(HotkeyAction::PasteSequential).await;
    assert_eq!(w.clipboard.current().as_deref(), Some("a\nb\nc"));
    assert!(w.engine.items().await.is_empty());
}

#[tokio::test]
async fn reorder_and_edit_commands_change_dispatch_order() {
    let mut w = world().await;
    w.copy("a").await;
    w.copy("b").await;
    w.copy("c").await;

    assert!(w.engine.move_item(2, 0).await);
    assert_eq!(w.engine.items().await, vec!["c", "a", "b"]);

    assert!(w.engine.update_item(1, "edited".to_string()).await);
    assert!(w.engine.duplicate_item(0).await);
    assert_eq!(w.engine.items().await, vec!["c", "c", "edited", "b"]);

    // Out-of-range commands are no-ops, not errors
    assert!(!w.engine.move_item(0, 9).await);
    assert!(!w.engine.update_item(9, "nope".to_string()).await);
    assert!(!w.engine.delete_item(9).await);
}

#[tokio::test]
async fn escape_resets_buffer_and_history() {
    let mut w = world().await;
    w.copy("a").await;
    w.copy("b").await;
    w.press(HotkeyAction::PasteSequential).await;
    w.poller.tick().await;
    assert_eq!(w.engine.history_len().await, 1);

    w.press(HotkeyAction::Escape).await;
    assert!(w.engine.items().await.is_empty());
    assert_eq!(w.engine.history_len().await, 0);
    assert!(!w.engine.restore().await);
}

#[tokio::test]
async fn copy_item_previews_without_removing() {
    let mut w = world().await;
    w.copy("keep").await;
    w.copy("other").await;

    assert!(w.engine.copy_item(0).await.unwrap());
    assert_eq!(w.clipboard.current().as_deref(), Some("keep"));

    // The preview write is suppressed at the next sample and the buffer
    // is untouched
    assert_eq!(w.poller.tick().await, Some(CopyOutcome::Suppressed));
    assert_eq!(w.engine.items().await, vec!["keep", "other"]);
}

#[tokio::test]
async fn idle_expiry_waits_for_panel_close() {
    let clipboard = Arc::new(FakeClipboard::default());
    let panel = Arc::new(FakePanel::default());
    let activity = Arc::new(ActivityTracker::new());
    let engine = Arc::new(BufferEngine::new(
        Arc::clone(&clipboard),
        ChordRecorder::default(),
        Arc::clone(&panel),
        Arc::clone(&activity),
        EngineConfig {
            idle_timeout: Duration::ZERO,
            close_delay_empty: Duration::ZERO,
            close_delay_nonempty: Duration::ZERO,
            ..EngineConfig::default()
        },
    ));

    activity.touch_user_event();
    engine.observe_clipboard(Some("stale".to_string())).await;
    panel.show().await;

    // Timeout elapsed but the panel is open
    assert!(!engine.expire_if_idle().await);
    assert_eq!(engine.items().await, vec!["stale"]);

    panel.close().await;
    assert!(engine.expire_if_idle().await);
    assert!(engine.items().await.is_empty());

    // Nothing left to expire
    assert!(!engine.expire_if_idle().await);
}
