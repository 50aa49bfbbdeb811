//! PasteDeck - clipboard paste queue daemon
//!
//! This crate watches the system clipboard, accumulates copied text into an
//! ordered buffer, and dispatches buffered items back out as synthesized
//! pastes, in controllable order, driven by global hotkeys.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: The paste buffer, activity classification, and config values
//! - **Application**: The buffer engine, change poller, hotkey command set,
//!   and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (arboard, enigo,
//!   global-hotkey, notify-rust, terminal panel)
//! - **CLI**: Command-line interface and the daemon runner

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
