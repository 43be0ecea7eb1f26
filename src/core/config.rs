//! Provider configuration for route-planner
//!
//! Endpoints, credentials and retry settings for the Kakao REST APIs.

use std::time::Duration;

use crate::core::error::{Error, Result};

/// Retry behavior for network errors
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// Delay before the first retry; doubles on each further retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * (1 << attempt.saturating_sub(1).min(16))
    }
}

/// Configuration for the Kakao geocoding and directions APIs
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// REST API key sent as `Authorization: KakaoAK <key>`
    pub api_key: String,

    /// Base URL of the Kakao Local API (geocoding)
    pub local_base_url: String,

    /// Base URL of the Kakao Mobility API (directions)
    pub navi_base_url: String,

    pub retry: RetryPolicy,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            local_base_url: "https://dapi.kakao.com".to_string(),
            navi_base_url: "https://apis-navi.kakaomobility.com".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ProviderConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Point both APIs at one host, e.g. a mock server
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        self.local_base_url = base_url.to_string();
        self.navi_base_url = base_url.to_string();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Kakao REST API key is missing (set KAKAO_REST_API_KEY or pass --api-key)"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn authorization(&self) -> String {
        format!("KakaoAK {}", self.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let config = ProviderConfig::default();
        assert_eq!(config.local_base_url, "https://dapi.kakao.com");
        assert_eq!(config.navi_base_url, "https://apis-navi.kakaomobility.com");
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let config = ProviderConfig::with_api_key("key").with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.local_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.navi_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.authorization(), "KakaoAK key");
    }

    #[test]
    fn test_validate_requires_key() {
        assert!(matches!(
            ProviderConfig::default().validate(),
            Err(Error::InvalidInput(_))
        ));
        assert!(ProviderConfig::with_api_key("abc").validate().is_ok());
    }

    #[test]
    fn test_retry_delay_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay(1), Duration::from_millis(1000));
        assert_eq!(policy.delay(2), Duration::from_millis(2000));
        assert_eq!(policy.delay(3), Duration::from_millis(4000));
    }
}
