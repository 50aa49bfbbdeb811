//! Global hotkey adapter using global-hotkey
//!
//! Registers the fixed chord set and translates key presses into
//! `HotkeyAction`s on a single-consumer channel; the event loop applies
//! them serialized with every other engine mutation. Registered chords are
//! consumed by the OS hook, which shapes the two conditional chords:
//! Escape is registered only while the buffer holds items (an unregistered
//! Escape reaches the foreground app natively, which is exactly its
//! pass-through case), and the real paste chord is never registered at all,
//! because its contract requires the paste to land and this crate cannot
//! re-inject a consumed chord. `HotkeyAction::ResetAndClose` stays in the
//! command set for embedders with an interceptor that can forward events.

use std::collections::HashMap;
use crossbeam_channel::RecvTimeoutError;
use std::sync::mpsc::Sender;
use std::time::Duration;

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::application::hotkeys::HotkeyAction;

/// How often the pump thread drains pending arm/disarm commands
const COMMAND_POLL: Duration = Duration::from_millis(50);

/// Hotkey registration errors
#[derive(Debug, Clone, Error)]
pub enum HotkeyError {
    #[error("Global hotkey manager unavailable: {0}")]
    ManagerUnavailable(String),

    #[error("Failed to register hotkey: {0}")]
    RegistrationFailed(String),
}

/// Default chord set: ⌘E sequential, ⌘⇧D reverse, ⌃1…⌃9 indexed,
/// ⌃P pop-front, ⌃⇧P pop-back, ⌘B panel toggle. META maps to Ctrl-side
/// equivalents on non-Apple layouts via the OS. Registered eagerly at
/// startup and held for the process lifetime.
fn default_bindings() -> Vec<(HotKey, HotkeyAction)> {
    let digits = [
        Code::Digit1,
        Code::Digit2,
        Code::Digit3,
        Code::Digit4,
        Code::Digit5,
        Code::Digit6,
        Code::Digit7,
        Code::Digit8,
        Code::Digit9,
    ];

    let mut bindings = vec![
        (
            HotKey::new(Some(Modifiers::META), Code::KeyE),
            HotkeyAction::PasteSequential,
        ),
        (
            HotKey::new(Some(Modifiers::META | Modifiers::SHIFT), Code::KeyD),
            HotkeyAction::PasteReverse,
        ),
        (
            HotKey::new(Some(Modifiers::CONTROL), Code::KeyP),
            HotkeyAction::PopFront,
        ),
        (
            HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::KeyP),
            HotkeyAction::PopBack,
        ),
        (
            HotKey::new(Some(Modifiers::META), Code::KeyB),
            HotkeyAction::TogglePanel,
        ),
    ];

    for (index, code) in digits.into_iter().enumerate() {
        bindings.push((
            HotKey::new(Some(Modifiers::CONTROL), code),
            HotkeyAction::PasteNth(index),
        ));
    }

    bindings
}

/// The bare Escape key, registered and unregistered as the buffer fills
/// and empties
fn escape_chord() -> HotKey {
    HotKey::new(None, Code::Escape)
}

/// Event-id lookup table: the eager chord set plus Escape, which is
/// mapped here even though its OS registration comes and goes
fn binding_map() -> HashMap<u32, HotkeyAction> {
    let mut map: HashMap<u32, HotkeyAction> = default_bindings()
        .into_iter()
        .map(|(hotkey, action)| (hotkey.id(), action))
        .collect();
    map.insert(escape_chord().id(), HotkeyAction::Escape);
    map
}

/// Handle for toggling the Escape registration from the event loop.
/// Commands are applied asynchronously by the pump thread.
pub struct EscapeRegistration {
    tx: Sender<bool>,
}

impl EscapeRegistration {
    pub(crate) fn new(tx: Sender<bool>) -> Self {
        Self { tx }
    }

    /// Register Escape when `armed`, unregister it otherwise. Dropping
    /// the handle freezes the current state.
    pub fn set_armed(&self, armed: bool) {
        let _ = self.tx.send(armed);
    }
}

/// Global hotkey listener.
///
/// Owns the OS-level registrations; dropping it unregisters them.
pub struct GlobalHotkeyListener {
    manager: GlobalHotKeyManager,
    bindings: HashMap<u32, HotkeyAction>,
}

impl GlobalHotkeyListener {
    /// Register the default chord set. Fails when the platform denies
    /// global key interception; callers degrade to hotkey-less operation.
    pub fn try_new() -> Result<Self, HotkeyError> {
        let manager = GlobalHotKeyManager::new()
            .map_err(|e| HotkeyError::ManagerUnavailable(e.to_string()))?;

        for (hotkey, _) in default_bindings() {
            manager
                .register(hotkey)
                .map_err(|e| HotkeyError::RegistrationFailed(e.to_string()))?;
        }

        Ok(Self {
            manager,
            bindings: binding_map(),
        })
    }

    /// Spawn the blocking OS event pump on a dedicated thread, forwarding
    /// mapped key presses onto `tx`. Key releases are ignored so one press
    /// triggers one action. The returned handle arms and disarms the
    /// Escape registration; Escape starts unregistered (empty buffer).
    pub fn spawn(self, tx: mpsc::UnboundedSender<HotkeyAction>) -> EscapeRegistration {
        let (cmd_tx, cmd_rx) = std::sync::mpsc::channel::<bool>();

        std::thread::spawn(move || {
            // The manager must outlive the registrations
            let manager = self.manager;
            let escape = escape_chord();
            let mut escape_armed = false;
            let receiver = GlobalHotKeyEvent::receiver();

            loop {
                while let Ok(arm) = cmd_rx.try_recv() {
                    if arm == escape_armed {
                        continue;
                    }
                    let applied = if arm {
                        manager.register(escape)
                    } else {
                        manager.unregister(escape)
                    };
                    if applied.is_ok() {
                        escape_armed = arm;
                    }
                }

                // Timeout bounds the latency of pending arm/disarm commands
                match receiver.recv_timeout(COMMAND_POLL) {
                    Ok(event) => {
                        if event.state != HotKeyState::Pressed {
                            continue;
                        }
                        let Some(action) = self.bindings.get(&event.id).copied() else {
                            continue;
                        };
                        if tx.send(action).is_err() {
                            return;
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {}
                    Err(RecvTimeoutError::Disconnected) => return,
                }
            }
        });

        EscapeRegistration::new(cmd_tx)
    }
}
