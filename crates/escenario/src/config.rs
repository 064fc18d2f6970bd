//! Runtime configuration.
//!
//! Wait timing is the only tunable surface: the appear/disappear timeout and
//! the polling interval. Values come from defaults, the environment, or any
//! key→string property source the test suite already has.

use crate::result::{EscenarioError, EscenarioResult};
use crate::wait::{WaitOptions, DEFAULT_APPEAR_TIMEOUT_MS, DEFAULT_POLL_INTERVAL_MS};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the appear-wait timeout
pub const APPEAR_TIMEOUT_ENV: &str = "ESCENARIO_APPEAR_TIMEOUT_MS";

/// Environment variable overriding the polling interval
pub const POLL_INTERVAL_ENV: &str = "ESCENARIO_POLL_INTERVAL_MS";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Timeout for appear/disappear waits in milliseconds
    pub appear_timeout_ms: u64,
    /// Polling interval for waits in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            appear_timeout_ms: DEFAULT_APPEAR_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the appear-wait timeout
    #[must_use]
    pub const fn with_appear_timeout(mut self, timeout_ms: u64) -> Self {
        self.appear_timeout_ms = timeout_ms;
        self
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Load overrides from the process environment.
    ///
    /// Unset variables keep their defaults; unparseable values are fatal
    /// configuration errors so a typo fails the suite at startup.
    pub fn from_env() -> EscenarioResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load overrides from any key→string property source
    pub fn from_lookup<F>(lookup: F) -> EscenarioResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(APPEAR_TIMEOUT_ENV) {
            config.appear_timeout_ms = parse_ms(APPEAR_TIMEOUT_ENV, &raw)?;
        }
        if let Some(raw) = lookup(POLL_INTERVAL_ENV) {
            config.poll_interval_ms = parse_ms(POLL_INTERVAL_ENV, &raw)?;
        }
        Ok(config)
    }

    /// Wait options carrying this configuration
    #[must_use]
    pub const fn wait_options(&self) -> WaitOptions {
        WaitOptions {
            timeout_ms: self.appear_timeout_ms,
            poll_interval_ms: self.poll_interval_ms,
        }
    }
}

fn parse_ms(key: &str, raw: &str) -> EscenarioResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| EscenarioError::InvalidProperty {
            key: key.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.appear_timeout_ms, 5000);
        assert_eq!(config.poll_interval_ms, 50);
    }

    #[test]
    fn test_builder_chaining() {
        let config = Config::new().with_appear_timeout(800).with_poll_interval(20);
        assert_eq!(config.appear_timeout_ms, 800);
        assert_eq!(config.poll_interval_ms, 20);
    }

    #[test]
    fn test_wait_options_conversion() {
        let options = Config::new().with_appear_timeout(800).wait_options();
        assert_eq!(options.timeout_ms, 800);
        assert_eq!(options.poll_interval_ms, 50);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = Config::from_lookup(|key| {
            (key == APPEAR_TIMEOUT_ENV).then(|| "9000".to_string())
        })
        .unwrap();
        assert_eq!(config.appear_timeout_ms, 9000);
        assert_eq!(config.poll_interval_ms, 50);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = Config::from_lookup(|key| {
            (key == APPEAR_TIMEOUT_ENV).then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            EscenarioError::InvalidProperty { key, value }
                if key == APPEAR_TIMEOUT_ENV && value == "soon"
        ));
    }

    #[test]
    fn test_from_lookup_empty_source_is_default() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = Config::new().with_appear_timeout(1234);
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
