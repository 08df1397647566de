//! Shared helpers for connector integration tests
//!
//! Tests run against a local mock HTTP server; the helpers here build a
//! configuration pointing at it with fast retry settings.

use monday_source::types::{Credentials, RetryConfig, SourceConfig};

/// Creates a connector configuration pointing at a mock server URL.
///
/// Retries are kept cheap (two attempts, zero backoff) so retry-path tests
/// finish quickly.
pub fn test_config(api_url: &str) -> SourceConfig {
    SourceConfig {
        credentials: Some(Credentials {
            auth_method: Some("api_token".to_string()),
            api_token: Some("test-token".to_string()),
            access_token: None,
        }),
        api_url: api_url.to_string(),
        retry: RetryConfig {
            max_attempts: 2,
            backoff_factor_secs: 0,
        },
        ..Default::default()
    }
}
