//! Main app runner for the capture daemon

use std::process::ExitCode;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::mpsc;
use tokio::time::{interval, MissedTickBehavior};

use crate::application::hotkeys::{apply, HotkeyAction};
use crate::application::ports::{ConfigStore, Panel, PasteSynthesizer, SystemClipboard};
use crate::application::{BufferEngine, ChangePoller, EngineConfig};
use crate::domain::activity::ActivityTracker;
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    ArboardClipboard, EnigoPasteSynthesizer, EscapeRegistration, GlobalHotkeyListener,
    NotifyRustNotifier, TerminalPanel, XdgConfigStore,
};

use super::args::Cli;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Load config merged from defaults, config file, and CLI args
pub async fn load_merged_config(cli: &Cli) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    let cli_config = AppConfig {
        poll_interval_ms: cli.poll_interval_ms,
        activity_window_ms: cli.activity_window_ms,
        strict_classification: if cli.strict { Some(true) } else { None },
        idle_timeout: cli.idle_timeout,
        expiry_check_interval: None,
        display_threshold: cli.display_threshold,
        notify: if cli.notify { Some(true) } else { None },
    };

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Keep the Escape registration in step with buffer emptiness: armed only
/// while there is something to reset, so an Escape press with an empty
/// buffer reaches the foreground app natively.
fn spawn_escape_watcher<C, P, S>(engine: Arc<BufferEngine<C, P, S>>, escape: EscapeRegistration)
where
    C: SystemClipboard + 'static,
    P: PasteSynthesizer + 'static,
    S: Panel + 'static,
{
    let mut changes = engine.subscribe();
    tokio::spawn(async move {
        use tokio::sync::broadcast::error::RecvError;
        let mut armed = false;
        loop {
            match changes.recv().await {
                Ok(()) | Err(RecvError::Lagged(_)) => {
                    let non_empty = engine.len().await > 0;
                    if non_empty != armed {
                        armed = non_empty;
                        escape.set_armed(armed);
                    }
                }
                Err(RecvError::Closed) => break,
            }
        }
    });
}

/// Run the capture daemon until SIGINT
pub async fn run(cli: Cli) -> ExitCode {
    let presenter = Presenter::new();
    let config = load_merged_config(&cli).await;

    let engine_config = EngineConfig {
        display_threshold: config.display_threshold_or_default(),
        activity_window: config.activity_window_or_default(),
        strict_classification: config.strict_classification_or_default(),
        idle_timeout: config.idle_timeout_or_default(),
        ..EngineConfig::default()
    };

    // Create adapters
    let clipboard = Arc::new(ArboardClipboard::new());
    let panel = Arc::new(TerminalPanel::new());
    let activity = Arc::new(ActivityTracker::new());

    // Create the engine
    let engine = Arc::new(BufferEngine::new(
        Arc::clone(&clipboard),
        EnigoPasteSynthesizer::new(),
        Arc::clone(&panel),
        Arc::clone(&activity),
        engine_config,
    ));

    // Spawn the clipboard poller
    let notifier = config.notify_or_default().then(NotifyRustNotifier::new);
    let poller = ChangePoller::new(
        Arc::clone(&clipboard),
        Arc::clone(&engine),
        notifier,
        config.poll_interval_or_default(),
    );
    let poller_task = tokio::spawn(poller.run());

    // Spawn the render observer: pull a fresh snapshot on every change signal
    let render_task = {
        let engine = Arc::clone(&engine);
        let panel = Arc::clone(&panel);
        let mut changes = engine.subscribe();
        tokio::spawn(async move {
            use tokio::sync::broadcast::error::RecvError;
            loop {
                match changes.recv().await {
                    // The signal carries no payload; lagging just means
                    // render the latest state once
                    Ok(()) | Err(RecvError::Lagged(_)) => {
                        panel.render(&engine.items().await);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    };

    // Register global hotkeys; registration failure degrades to
    // capture-only operation rather than aborting
    let (hotkey_tx, mut hotkey_rx) = mpsc::unbounded_channel::<HotkeyAction>();
    if cli.no_hotkeys {
        presenter.info("Hotkeys disabled; capture-only mode");
    } else {
        match GlobalHotkeyListener::try_new() {
            Ok(listener) => {
                let escape = listener.spawn(hotkey_tx);
                spawn_escape_watcher(Arc::clone(&engine), escape);
            }
            Err(e) => {
                presenter.warn(&format!("{}; running without hotkeys", e));
            }
        }
    }

    presenter.status("watching clipboard");
    presenter.info(&format!(
        "poll: {:?} | idle timeout: {:?} | threshold: {}",
        config.poll_interval_or_default(),
        config.idle_timeout_or_default(),
        config.display_threshold_or_default(),
    ));

    let mut expiry = interval(config.expiry_check_interval_or_default());
    expiry.set_missed_tick_behavior(MissedTickBehavior::Delay);
    expiry.tick().await; // First tick fires immediately

    let exit = loop {
        tokio::select! {
            Some(action) = hotkey_rx.recv() => {
                // A hotkey press is a real user input event
                activity.touch_user_event();
                match apply(&engine, action).await {
                    Ok(_) => {}
                    Err(e) => presenter.error(&e.to_string()),
                }
            }
            _ = expiry.tick() => {
                if engine.expire_if_idle().await {
                    presenter.info("Buffer expired after idle timeout");
                }
            }
            result = signal::ctrl_c() => {
                match result {
                    Ok(()) => {
                        presenter.status("shutting down");
                        break EXIT_SUCCESS;
                    }
                    Err(e) => {
                        presenter.error(&format!("Signal handler failed: {}", e));
                        break EXIT_ERROR;
                    }
                }
            }
        }
    };

    poller_task.abort();
    render_task.abort();
    ExitCode::from(exit)
}
