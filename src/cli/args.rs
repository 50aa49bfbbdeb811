//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// PasteDeck - clipboard paste queue
#[derive(Parser, Debug)]
#[command(name = "pastedeck")]
#[command(version)]
#[command(about = "Collect clipboard copies into an ordered queue and paste them back out")]
#[command(long_about = None)]
pub struct Cli {
    /// Clipboard sample interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Seconds of clipboard inactivity before the queue auto-resets
    #[arg(short = 't', long, value_name = "SECS")]
    pub idle_timeout: Option<u64>,

    /// Queue size at which the panel auto-surfaces
    #[arg(short = 's', long, value_name = "N")]
    pub display_threshold: Option<usize>,

    /// Window after user input within which a copy counts as genuine, ms
    #[arg(long, value_name = "MS")]
    pub activity_window_ms: Option<u64>,

    /// Drop clipboard changes not attributable to recent user input
    #[arg(long)]
    pub strict: bool,

    /// Show a desktop notification for each captured copy
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Run without registering global hotkeys
    #[arg(long)]
    pub no_hotkeys: bool,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "poll_interval_ms",
    "activity_window_ms",
    "strict_classification",
    "idle_timeout",
    "expiry_check_interval",
    "display_threshold",
    "notify",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
