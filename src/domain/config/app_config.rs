//! Application configuration value object

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Documented local default for the voice-note service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1/voice";

/// Default upload timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            base_url: Some(DEFAULT_BASE_URL.to_string()),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
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
            base_url: other.base_url.or(self.base_url),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }

    /// Get the base URL, or the documented local default if not set
    pub fn base_url_or_default(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Get the upload timeout, or the default if not set
    pub fn timeout_or_default(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.base_url, Some(DEFAULT_BASE_URL.to_string()));
        assert_eq!(config.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.base_url.is_none());
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            base_url: Some("http://base.example".to_string()),
            timeout_secs: Some(10),
        };

        let other = AppConfig {
            base_url: Some("http://other.example".to_string()),
            timeout_secs: None, // Should not override
        };

        let merged = base.merge(other);

        assert_eq!(merged.base_url, Some("http://other.example".to_string()));
        assert_eq!(merged.timeout_secs, Some(10)); // Kept from base
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            base_url: Some("http://base.example".to_string()),
            timeout_secs: Some(5),
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.base_url, Some("http://base.example".to_string()));
        assert_eq!(merged.timeout_secs, Some(5));
    }

    #[test]
    fn base_url_or_default_falls_back() {
        let config = AppConfig::empty();
        assert_eq!(config.base_url_or_default(), DEFAULT_BASE_URL);
    }

    #[test]
    fn timeout_or_default_falls_back() {
        let config = AppConfig::empty();
        assert_eq!(
            config.timeout_or_default(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn timeout_or_default_uses_configured_value() {
        let config = AppConfig {
            timeout_secs: Some(5),
            ..Default::default()
        };
        assert_eq!(config.timeout_or_default(), Duration::from_secs(5));
    }
}
