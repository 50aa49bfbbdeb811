//! Terminal panel adapter
//!
//! The floating panel proper is a GUI concern; this daemon renders the
//! buffer to the terminal instead. It subscribes to the engine's change
//! broadcast like any other presentation-layer observer and pulls the
//! current snapshot on each signal.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use colored::*;

use crate::application::ports::Panel;

/// Terminal stand-in for the buffer panel
#[derive(Default)]
pub struct TerminalPanel {
    open: AtomicBool,
}

impl TerminalPanel {
    /// Create a new terminal panel, initially closed
    pub fn new() -> Self {
        Self {
            open: AtomicBool::new(false),
        }
    }

    /// Render the current buffer snapshot. Rows are numbered from 1 to
    /// match the indexed-paste hotkeys; embedded newlines are flattened
    /// so each item stays on one row.
    pub fn render(&self, items: &[String]) {
        if !self.is_open() {
            return;
        }

        eprintln!("{}", format!("── buffer ({}) ──", items.len()).bold());
        for (row, item) in items.iter().enumerate() {
            let label = if row < 9 {
                format!("{}", row + 1).cyan()
            } else {
                " ".normal()
            };
            eprintln!("  {} {}", label, flatten(item));
        }
    }
}

/// Trim and collapse newlines so an item renders as a single row
fn flatten(text: &str) -> String {
    text.trim().replace('\n', " ↩ ")
}

#[async_trait]
impl Panel for TerminalPanel {
    async fn show(&self) {
        if !self.open.swap(true, Ordering::SeqCst) {
            eprintln!("{}", "panel open".dimmed());
        }
    }

    async fn close(&self) {
        if self.open.swap(false, Ordering::SeqCst) {
            eprintln!("{}", "panel closed".dimmed());
        }
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn panel_starts_closed() {
        let panel = TerminalPanel::new();
        assert!(!panel.is_open());
    }

    #[tokio::test]
    async fn show_and_close_flip_state() {
        let panel = TerminalPanel::new();
        panel.show().await;
        assert!(panel.is_open());
        panel.close().await;
        assert!(!panel.is_open());
    }

    #[test]
    fn flatten_collapses_newlines_and_trims() {
        assert_eq!(flatten("  a\nb \n"), "a ↩ b");
        assert_eq!(flatten("plain"), "plain");
    }
}
