//! Record envelope emitted to the downstream pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::resource::ResourceKind;

/// One record as handed to the ingestion pipeline: the raw mapping returned
/// by the API plus the stream it came from and the emission timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMessage {
    pub stream: ResourceKind,
    pub data: Value,
    pub emitted_at: DateTime<Utc>,
}

impl RecordMessage {
    pub fn new(stream: ResourceKind, data: Value) -> Self {
        Self {
            stream,
            data,
            emitted_at: Utc::now(),
        }
    }
}
