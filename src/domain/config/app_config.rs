//! Application configuration value object

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Clipboard change-counter sample interval, milliseconds
    pub poll_interval_ms: Option<u64>,
    /// Window after the last real user input within which a clipboard
    /// change counts as a genuine user copy, milliseconds
    pub activity_window_ms: Option<u64>,
    /// Drop clipboard changes not attributable to recent user input.
    /// Off by default: the daemon has no global input monitor, so only
    /// its own hotkey presses refresh the activity clock.
    pub strict_classification: Option<bool>,
    /// Seconds of clipboard inactivity before the buffer auto-resets
    pub idle_timeout: Option<u64>,
    /// Seconds between idle-expiry checks
    pub expiry_check_interval: Option<u64>,
    /// Buffer size at which the panel auto-surfaces
    pub display_threshold: Option<usize>,
    /// Show a desktop notification for each accepted copy
    pub notify: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            poll_interval_ms: Some(100),
            activity_window_ms: Some(1000),
            strict_classification: Some(false),
            idle_timeout: Some(90),
            expiry_check_interval: Some(30),
            display_threshold: Some(2),
            notify: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            poll_interval_ms: other.poll_interval_ms.or(self.poll_interval_ms),
            activity_window_ms: other.activity_window_ms.or(self.activity_window_ms),
            strict_classification: other.strict_classification.or(self.strict_classification),
            idle_timeout: other.idle_timeout.or(self.idle_timeout),
            expiry_check_interval: other.expiry_check_interval.or(self.expiry_check_interval),
            display_threshold: other.display_threshold.or(self.display_threshold),
            notify: other.notify.or(self.notify),
        }
    }

    /// Get poll interval, or 100ms if not set
    pub fn poll_interval_or_default(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.unwrap_or(100))
    }

    /// Get activity window, or 1s if not set
    pub fn activity_window_or_default(&self) -> Duration {
        Duration::from_millis(self.activity_window_ms.unwrap_or(1000))
    }

    /// Get idle timeout, or 90s if not set
    pub fn idle_timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.idle_timeout.unwrap_or(90))
    }

    /// Get expiry check interval, or 30s if not set
    pub fn expiry_check_interval_or_default(&self) -> Duration {
        Duration::from_secs(self.expiry_check_interval.unwrap_or(30))
    }

    /// Get display threshold, or 2 if not set
    pub fn display_threshold_or_default(&self) -> usize {
        self.display_threshold.unwrap_or(2)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get strict classification setting, or false if not set
    pub fn strict_classification_or_default(&self) -> bool {
        self.strict_classification.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.poll_interval_ms, Some(100));
        assert_eq!(config.activity_window_ms, Some(1000));
        assert_eq!(config.strict_classification, Some(false));
        assert_eq!(config.idle_timeout, Some(90));
        assert_eq!(config.expiry_check_interval, Some(30));
        assert_eq!(config.display_threshold, Some(2));
        assert_eq!(config.notify, Some(false));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.poll_interval_ms.is_none());
        assert!(config.activity_window_ms.is_none());
        assert!(config.idle_timeout.is_none());
        assert!(config.display_threshold.is_none());
        assert!(config.notify.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            poll_interval_ms: Some(100),
            idle_timeout: Some(60),
            display_threshold: Some(2),
            ..Default::default()
        };

        let other = AppConfig {
            poll_interval_ms: Some(250),
            idle_timeout: None, // Should not override
            display_threshold: Some(3),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.poll_interval_ms, Some(250));
        assert_eq!(merged.idle_timeout, Some(60)); // Kept from base
        assert_eq!(merged.display_threshold, Some(3));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            idle_timeout: Some(120),
            notify: Some(true),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.idle_timeout, Some(120));
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.poll_interval_or_default(), Duration::from_millis(100));
        assert_eq!(config.activity_window_or_default(), Duration::from_secs(1));
        assert_eq!(config.idle_timeout_or_default(), Duration::from_secs(90));
        assert_eq!(
            config.expiry_check_interval_or_default(),
            Duration::from_secs(30)
        );
        assert_eq!(config.display_threshold_or_default(), 2);
        assert!(!config.notify_or_default());
    }

    #[test]
    fn accessors_use_configured_values() {
        let config = AppConfig {
            poll_interval_ms: Some(50),
            activity_window_ms: Some(2000),
            idle_timeout: Some(120),
            display_threshold: Some(1),
            notify: Some(true),
            ..Default::default()
        };
        assert_eq!(config.poll_interval_or_default(), Duration::from_millis(50));
        assert_eq!(config.activity_window_or_default(), Duration::from_secs(2));
        assert_eq!(config.idle_timeout_or_default(), Duration::from_secs(120));
        assert_eq!(config.display_threshold_or_default(), 1);
        assert!(config.notify_or_default());
    }
}
