//! Connector configuration.
//!
//! The configuration arrives as a JSON document from the operator. The
//! credential block mirrors the two supported auth provenances (direct API
//! token or an OAuth access token); a legacy top-level `api_token` field is
//! still honored for older configurations.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the Monday.com source connector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Credential block selecting the auth method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,

    /// Legacy top-level API token, honored when the credential block carries
    /// no token of its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Base URL for the Monday.com API (default: https://api.monday.com/v2)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,

    /// Directory holding per-resource schema documents, overriding the
    /// documents shipped with the connector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_dir: Option<PathBuf>,
}

/// Credential block of the connector configuration.
///
/// `auth_method` is kept as the raw configured string so that an unknown
/// method can be reported back to the operator verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Credentials {
    /// An empty credential block is treated the same as an absent one.
    pub fn is_empty(&self) -> bool {
        self.auth_method.is_none() && self.api_token.is_none() && self.access_token.is_none()
    }
}

fn default_api_url() -> String {
    "https://api.monday.com/v2".into()
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Retry configuration.
///
/// The backoff factor defaults to 15 seconds because complexity-limit
/// cooldowns on the Monday API are long relative to generic transient-error
/// backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum retry attempts
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base backoff delay in seconds, doubled on each attempt
    #[serde(default = "default_backoff_factor_secs")]
    pub backoff_factor_secs: u64,
}

fn default_max_attempts() -> u32 {
    5
}

fn default_backoff_factor_secs() -> u64 {
    15
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_factor_secs: default_backoff_factor_secs(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            api_token: None,
            api_url: default_api_url(),
            timeout: default_timeout(),
            retry: RetryConfig::default(),
            schema_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: SourceConfig = serde_json::from_str("{}").unwrap();
        assert!(config.credentials.is_none());
        assert!(config.api_token.is_none());
        assert_eq!(config.api_url, "https://api.monday.com/v2");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.backoff_factor_secs, 15);
    }

    #[test]
    fn test_full_document() {
        let config: SourceConfig = serde_json::from_value(serde_json::json!({
            "credentials": {
                "auth_method": "api_token",
                "api_token": "secret"
            },
            "api_url": "https://example.test/v2",
            "timeout": 5,
            "retry": { "max_attempts": 2, "backoff_factor_secs": 1 }
        }))
        .unwrap();

        let credentials = config.credentials.unwrap();
        assert_eq!(credentials.auth_method.as_deref(), Some("api_token"));
        assert_eq!(credentials.api_token.as_deref(), Some("secret"));
        assert_eq!(config.api_url, "https://example.test/v2");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.retry.max_attempts, 2);
    }

    #[test]
    fn test_legacy_top_level_token() {
        let config: SourceConfig =
            serde_json::from_value(serde_json::json!({ "api_token": "legacy" })).unwrap();
        assert_eq!(config.api_token.as_deref(), Some("legacy"));
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_empty_credentials_block() {
        let config: SourceConfig =
            serde_json::from_value(serde_json::json!({ "credentials": {} })).unwrap();
        assert!(config.credentials.unwrap().is_empty());
    }
}
