//! Hotkey command set and dispatch rules
//!
//! The OS-facing hotkey adapter translates raw chords into this closed set
//! of actions and funnels them onto a single-consumer channel; the event
//! loop applies them here, serialized with every other engine mutation.
//! The disposition tells the interceptor whether to swallow the chord or
//! let it reach the foreground application.

use super::engine::{BufferEngine, EngineError};
use super::ports::{Panel, PasteSynthesizer, SystemClipboard};

/// One engine command, as mapped from a global key chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Dispatch the front item (default ⌘E)
    PasteSequential,
    /// Dispatch the back item (default ⌘⇧D)
    PasteReverse,
    /// Dispatch the item at a fixed index, keys 1-9 -> indices 0-8
    /// (default ⌃1…⌃9)
    PasteNth(usize),
    /// Delete the front item (default ⌃P)
    PopFront,
    /// Delete the back item (default ⌃⇧P)
    PopBack,
    /// Surface or hide the panel (default ⌘B)
    TogglePanel,
    /// Reset and close; bound to the real paste chord (⌘V) and always
    /// passed through so the paste still lands
    ResetAndClose,
    /// Reset and close; swallowed only when the buffer held items
    Escape,
}

/// Whether the intercepted chord should reach the foreground app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Consume the chord
    Swallow,
    /// Forward the chord to the OS unmodified
    PassThrough,
}

/// Apply a hotkey action to the engine.
///
/// Chords mapped to a no-op in the current state pass through; chords that
/// performed a dispatch or mutation are swallowed. The two exceptions are
/// fixed by contract: ⌘V always passes through (the real paste must land),
/// and Escape is swallowed exactly when the buffer was non-empty at
/// invocation time.
pub async fn apply<C, P, S>(
    engine: &BufferEngine<C, P, S>,
    action: HotkeyAction,
) -> Result<Disposition, EngineError>
where
    C: SystemClipboard,
    P: PasteSynthesizer,
    S: Panel + 'static,
{
    let disposition = match action {
        HotkeyAction::PasteSequential => swallow_if(engine.paste_sequential().await?),
        HotkeyAction::PasteReverse => swallow_if(engine.paste_reverse().await?),
        HotkeyAction::PasteNth(index) => swallow_if(engine.paste_nth(index).await?),
        HotkeyAction::PopFront => swallow_if(engine.pop_front().await),
        HotkeyAction::PopBack => swallow_if(engine.pop_back().await),
        HotkeyAction::TogglePanel => {
            engine.toggle_panel().await;
            Disposition::Swallow
        }
        HotkeyAction::ResetAndClose => {
            engine.reset_and_close().await;
            Disposition::PassThrough
        }
        HotkeyAction::Escape => {
            let had_items = engine.reset_and_close().await > 0;
            swallow_if(had_items)
        }
    };
    Ok(disposition)
}

fn swallow_if(acted: bool) -> Disposition {
    if acted {
        Disposition::Swallow
    } else {
        Disposition::PassThrough
    }
}
