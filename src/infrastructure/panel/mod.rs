//! Panel adapters

pub mod terminal;

pub use terminal::TerminalPanel;
