//! HTTP client for the Monday.com GraphQL endpoint.
//!
//! All resources share a single endpoint; a request is a POST whose GraphQL
//! string travels as the `query` URL parameter. The client owns the retry
//! engine; retryability decisions and the backoff factor come from the
//! response classification in [`crate::monday::error`].

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, StatusCode, header};
use tokio::time::sleep;
use tracing::{debug, warn};
use url::Url;

use crate::monday::auth::BearerCredential;
use crate::monday::error::ApiRetryableError;
use crate::monday::graphql::{self, GraphQLQuery, GraphQLResponse};
use crate::types::SourceConfig;

#[derive(Clone)]
pub struct MondayClient {
    http: Client,
    endpoint: Url,
    credential: BearerCredential,
    max_retries: u32,
    backoff_factor: Duration,
}

impl MondayClient {
    /// Build a client from configuration and a resolved credential.
    pub fn new(config: &SourceConfig, credential: BearerCredential) -> Result<Self> {
        let endpoint = Url::parse(&config.api_url)
            .with_context(|| format!("Invalid Monday API url: {}", config.api_url))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("monday-source/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint,
            credential,
            max_retries: config.retry.max_attempts,
            backoff_factor: Duration::from_secs(config.retry.backoff_factor_secs),
        })
    }

    /// Execute a GraphQL query, retrying transient failures.
    ///
    /// Responses are classified before being treated as terminal: 429 and
    /// 5xx statuses retry, as does a 2xx response whose body carries an
    /// `errors` payload (a complexity rejection). Other 4xx statuses fail
    /// immediately.
    pub async fn execute_query(
        &self,
        query_name: &str,
        query: &GraphQLQuery,
    ) -> Result<GraphQLResponse> {
        retry_with_backoff(
            query_name,
            self.max_retries,
            self.backoff_factor,
            || async {
                debug!("Sending GraphQL request {}: {}", query_name, query.as_str());
                let start = std::time::Instant::now();

                let (status, body) = self.post_query(query).await?;

                if !status.is_success() {
                    return Err(ApiRetryableError::from_status(status, &body));
                }

                let response: GraphQLResponse =
                    serde_json::from_str(&body).map_err(|error| {
                        ApiRetryableError::NonRetryable(format!(
                            "Malformed Monday API response body: {}",
                            error
                        ))
                    })?;

                if response.has_errors() {
                    let message = response.error_messages();
                    warn!(
                        "Monday API rejected {} under status {}: {}",
                        query_name, status, message
                    );
                    return Err(ApiRetryableError::Retryable(format!(
                        "Query rejected: {}",
                        message
                    )));
                }

                debug!(
                    "GraphQL request {} completed in {:?}",
                    query_name,
                    start.elapsed()
                );
                Ok(response)
            },
        )
        .await
    }

    /// Single-attempt credential probe against the shared endpoint.
    ///
    /// Never retried and never raises; a non-2xx status or transport error
    /// is captured and returned so the caller can report diagnostics.
    pub async fn check_connection(&self) -> (bool, Option<anyhow::Error>) {
        match self.post_query(&graphql::me_query()).await {
            Ok((status, _)) if status.is_success() => (true, None),
            Ok((status, body)) => (
                false,
                Some(anyhow::anyhow!(
                    "Monday API connection check returned {}: {}",
                    status,
                    body
                )),
            ),
            Err(error) => (
                false,
                Some(anyhow::Error::new(error).context("Monday API connection check failed")),
            ),
        }
    }

    async fn post_query(
        &self,
        query: &GraphQLQuery,
    ) -> std::result::Result<(StatusCode, String), ApiRetryableError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .query(&[("query", query.as_str())])
            .header(header::AUTHORIZATION, self.credential.authorization_header())
            .send()
            .await
            .map_err(|error| {
                ApiRetryableError::Retryable(format!("HTTP transport error: {}", error))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            ApiRetryableError::Retryable(format!("Failed to read response body: {}", error))
        })?;

        Ok((status, body))
    }
}

impl std::fmt::Debug for MondayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MondayClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

pub(crate) async fn retry_with_backoff<F, Fut, T>(
    operation_name: &str,
    max_retries: u32,
    backoff_factor: Duration,
    execute_operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<T, ApiRetryableError>>,
{
    let mut attempt = 0;

    loop {
        match execute_operation().await {
            Ok(result) => {
                debug!(
                    "Operation {} succeeded on attempt {}",
                    operation_name,
                    attempt + 1
                );
                return Ok(result);
            }
            Err(error) => {
                warn!(
                    "Operation {} failed on attempt {}: {}",
                    operation_name,
                    attempt + 1,
                    error
                );

                match error {
                    ApiRetryableError::NonRetryable(_) => {
                        warn!(
                            "Operation {} returned non-retryable error, failing immediately",
                            operation_name
                        );
                        return Err(anyhow::anyhow!(error));
                    }
                    ApiRetryableError::RateLimit | ApiRetryableError::Retryable(_)
                        if attempt < max_retries =>
                    {
                        attempt += 1;
                        let backoff_delay =
                            backoff_factor.saturating_mul(2_u32.saturating_pow(attempt - 1));
                        warn!(
                            "Retrying {} (attempt {}/{}) after backing off for {:?}",
                            operation_name, attempt, max_retries, backoff_delay
                        );
                        sleep(backoff_delay).await;
                    }
                    _ => {
                        warn!(
                            "Retries exhausted for {} after {} attempts",
                            operation_name,
                            attempt + 1
                        );
                        return Err(anyhow::anyhow!(error));
                    }
                }
            }
        }
    }
}
