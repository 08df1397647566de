//! Connection probing and stream-list construction.

use anyhow::{Context, Result};
use strum::IntoEnumIterator;
use tracing::info;

use crate::monday::auth::resolve_credential;
use crate::monday::{MondayClient, ResourceStream};
use crate::types::{ResourceKind, SourceConfig};

/// The configured Monday.com source: validates credentials and assembles
/// the list of active resource streams.
#[derive(Debug, Clone)]
pub struct MondaySource {
    config: SourceConfig,
}

impl MondaySource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Probe the API with the configured credentials.
    ///
    /// Single attempt, no retry. Never raises: configuration errors and
    /// non-2xx responses alike are captured and returned so the operator
    /// sees diagnostics without a crash.
    pub async fn check_connection(&self) -> (bool, Option<anyhow::Error>) {
        let credential = match resolve_credential(&self.config) {
            Ok(credential) => credential,
            Err(error) => return (false, Some(anyhow::Error::new(error))),
        };

        let client = match MondayClient::new(&self.config, credential) {
            Ok(client) => client,
            Err(error) => return (false, Some(error)),
        };

        client.check_connection().await
    }

    /// Construct the five resource streams in fixed order: items, boards,
    /// teams, updates, users.
    ///
    /// The credential is resolved once and shared read-only by every
    /// stream for the duration of the sync. Configuration and schema
    /// errors surface here, before any network call.
    pub fn streams(&self) -> Result<Vec<ResourceStream>> {
        let credential = resolve_credential(&self.config)?;
        let client = MondayClient::new(&self.config, credential)?;

        let streams = ResourceKind::iter()
            .map(|resource| {
                ResourceStream::new(
                    client.clone(),
                    resource,
                    self.config.schema_dir.as_deref(),
                )
                .with_context(|| format!("Failed to construct stream {}", resource))
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Constructed {} resource streams", streams.len());
        Ok(streams)
    }
}
