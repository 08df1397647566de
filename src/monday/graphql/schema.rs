//! Per-resource field-schema loading.
//!
//! Each resource ships with a JSON schema document whose `properties`
//! mapping declares the fields to request. The document flattens into a
//! single GraphQL field fragment: scalar fields emit their bare name,
//! object-typed fields with their own `properties` emit
//! `name{sub1,sub2,...}` with subfields in declared order, and all tokens
//! join with commas.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::types::ResourceKind;

/// Schema document errors. Fatal at first use of a resource; never retried.
#[derive(Debug)]
pub enum SchemaError {
    /// Document not found or unreadable
    Missing {
        resource: ResourceKind,
        path: String,
    },
    /// Document exists but is not a schema with a `properties` mapping
    Malformed {
        resource: ResourceKind,
        reason: String,
    },
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { resource, path } => {
                write!(f, "Schema document for {} not found at {}", resource, path)
            }
            Self::Malformed { resource, reason } => {
                write!(f, "Schema document for {} is malformed: {}", resource, reason)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Flattened GraphQL field fragment for a resource, from the documents
/// shipped with the connector.
pub fn graphql_fields(resource: ResourceKind) -> Result<String, SchemaError> {
    flatten_document(resource, embedded_document(resource))
}

/// Flattened fragment from a schema directory override. The directory must
/// hold one `<resource>.json` document per resource.
pub fn graphql_fields_from_dir(dir: &Path, resource: ResourceKind) -> Result<String, SchemaError> {
    let path = dir.join(format!("{}.json", resource.name()));
    let raw = fs::read_to_string(&path).map_err(|error| SchemaError::Missing {
        resource,
        path: format!("{} ({})", path.display(), error),
    })?;
    flatten_document(resource, &raw)
}

const fn embedded_document(resource: ResourceKind) -> &'static str {
    match resource {
        ResourceKind::Items => include_str!("../../../schemas/items.json"),
        ResourceKind::Boards => include_str!("../../../schemas/boards.json"),
        ResourceKind::Teams => include_str!("../../../schemas/teams.json"),
        ResourceKind::Updates => include_str!("../../../schemas/updates.json"),
        ResourceKind::Users => include_str!("../../../schemas/users.json"),
    }
}

fn flatten_document(resource: ResourceKind, raw: &str) -> Result<String, SchemaError> {
    let document: Value = serde_json::from_str(raw).map_err(|error| SchemaError::Malformed {
        resource,
        reason: error.to_string(),
    })?;

    let properties = document
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| SchemaError::Malformed {
            resource,
            reason: "no properties mapping".to_string(),
        })?;

    Ok(flatten_properties(properties))
}

fn flatten_properties(properties: &Map<String, Value>) -> String {
    properties
        .iter()
        .map(|(field, declaration)| {
            match declaration.get("properties").and_then(Value::as_object) {
                Some(nested) => {
                    let subfields = nested.keys().cloned().collect::<Vec<_>>().join(",");
                    format!("{field}{{{subfields}}}")
                }
                None => field.clone(),
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
