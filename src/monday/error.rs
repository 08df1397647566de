//! Classification of API responses for retry logic.

use reqwest::StatusCode;

use crate::monday::graphql::GraphQLResponse;

/// Retry classification of a failed API operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRetryableError {
    /// Errors that should be retried (5xx server errors, transport
    /// failures, complexity rejections)
    Retryable(String),
    /// Rate limiting errors (429) - retryable with backoff
    RateLimit,
    /// Client errors that should not be retried (4xx except 429)
    NonRetryable(String),
}

impl ApiRetryableError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status.as_u16() {
            429 => {
                tracing::warn!("Rate limit (429) detected for Monday API request");
                Self::RateLimit
            }
            500..=599 => {
                let message = format!("Monday API server error {}: {}", status, body);
                tracing::warn!("Server error - will retry: {}", message);
                Self::Retryable(message)
            }
            _ => {
                let message = format!("Monday API client error {}: {}", status, body);
                tracing::error!("Non-retryable client error: {}", message);
                Self::NonRetryable(message)
            }
        }
    }
}

impl std::fmt::Display for ApiRetryableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retryable(msg) => write!(f, "Retryable error: {}", msg),
            Self::RateLimit => write!(f, "Rate limit error"),
            Self::NonRetryable(msg) => write!(f, "Non-retryable error: {}", msg),
        }
    }
}

impl std::error::Error for ApiRetryableError {}

/// Retry predicate, evaluated on every response before it is treated as
/// terminal: HTTP 429, any 5xx, or an `errors` payload in the parsed body
/// (the API reports query-complexity rejections this way even under a 200).
pub fn should_retry(status: StatusCode, response: &GraphQLResponse) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() || response.has_errors()
}
