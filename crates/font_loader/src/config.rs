//! Watcher configuration

use crate::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use unicode_range::DEFAULT_TEST_STRING;

/// Default time a session waits for a font before rejecting
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;

/// Default delay between two width checks
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 25;

/// Timing and text used by detection sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
    /// Text rendered when the caller supplies none
    pub default_test_string: String,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            default_test_string: DEFAULT_TEST_STRING.to_string(),
        }
    }
}

impl WatcherConfig {
    /// Load a configuration from JSON, missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_test_string(mut self, text: impl Into<String>) -> Self {
        self.default_test_string = text.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LoadError;

    #[test]
    fn test_defaults() {
        let config = WatcherConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.poll_interval(), Duration::from_millis(25));
        assert_eq!(config.default_test_string, "BESbswy");
    }

    #[test]
    fn test_from_json() {
        let config = WatcherConfig::from_json(r#"{"timeout_ms": 5000}"#).unwrap();
        assert_eq!(config.timeout_ms, 5000);
        assert_eq!(config.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);

        let config = WatcherConfig::from_json("{}").unwrap();
        assert_eq!(config, WatcherConfig::default());

        assert!(matches!(
            WatcherConfig::from_json("{\"timeout_ms\": \"soon\"}"),
            Err(LoadError::Config(_))
        ));
    }

    #[test]
    fn test_builders() {
        let config = WatcherConfig::default()
            .with_timeout(Duration::from_millis(100))
            .with_poll_interval(Duration::from_millis(10))
            .with_test_string("abc");
        assert_eq!(config.timeout_ms, 100);
        assert_eq!(config.poll_interval_ms, 10);
        assert_eq!(config.default_test_string, "abc");
    }
}
