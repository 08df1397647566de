//! GraphQL query construction and response envelope types.
//!
//! Monday.com exposes every resource through one endpoint; requests differ
//! only in the query string. Queries are built fresh per request and never
//! reused across resources.

pub mod schema;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single opaque GraphQL query string, sent as the `query` request
/// parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphQLQuery(pub String);

impl GraphQLQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parsed response envelope.
///
/// A well-formed response carries a `data` mapping keyed by lower-cased
/// resource name. An `errors` payload under a 2xx status is the API's
/// signal for a query-complexity rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default)]
    pub locations: Vec<Value>,
    #[serde(default)]
    pub path: Vec<Value>,
}

impl GraphQLResponse {
    /// Record sequence for a resource, in server response order.
    ///
    /// A missing envelope or missing key degrades to an empty sequence
    /// rather than an error.
    pub fn records(&self, resource_name: &str) -> Vec<Value> {
        self.data
            .as_ref()
            .and_then(|data| data.get(resource_name))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|errors| !errors.is_empty())
    }

    pub fn error_messages(&self) -> String {
        self.errors
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|error| error.message.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Build the query for one resource collection.
///
/// Without arguments: `query { <name> { <fields> } }`. With arguments each
/// pair renders as `key:value` and the pairs join with commas:
/// `query { <name> (<pairs>) { <fields> } }`. The current resource set uses
/// at most one pagination argument, but the join rule holds for any number.
pub fn resource_query(
    resource_name: &str,
    field_fragment: &str,
    arguments: &[(&str, String)],
) -> GraphQLQuery {
    if arguments.is_empty() {
        GraphQLQuery(format!("query {{ {resource_name} {{ {field_fragment} }} }}"))
    } else {
        let rendered = arguments
            .iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect::<Vec<_>>()
            .join(",");
        GraphQLQuery(format!(
            "query {{ {resource_name} ({rendered}) {{ {field_fragment} }} }}"
        ))
    }
}

/// Minimal introspection query used to probe the configured credentials.
pub fn me_query() -> GraphQLQuery {
    GraphQLQuery("query { me { is_guest created_at name id } }".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_query_without_arguments() {
        let query = resource_query("items", "id,name", &[]);
        assert_eq!(query.as_str(), "query { items { id,name } }");
    }

    #[test]
    fn test_resource_query_with_page_argument() {
        let query = resource_query("items", "id,name", &[("page", "2".to_string())]);
        assert_eq!(query.as_str(), "query { items (page:2) { id,name } }");
    }

    #[test]
    fn test_resource_query_joins_multiple_arguments() {
        let query = resource_query(
            "boards",
            "id",
            &[("pageInt", "3".to_string()), ("limit", "50".to_string())],
        );
        assert_eq!(query.as_str(), "query { boards (pageInt:3,limit:50) { id } }");
    }

    #[test]
    fn test_me_query() {
        assert_eq!(
            me_query().as_str(),
            "query { me { is_guest created_at name id } }"
        );
    }

    #[test]
    fn test_records_extraction_in_response_order() {
        let response: GraphQLResponse = serde_json::from_value(serde_json::json!({
            "data": { "items": [ {"id": "3"}, {"id": "1"}, {"id": "2"} ] }
        }))
        .unwrap();

        let records = response.records("items");
        let ids: Vec<&str> = records
            .iter()
            .map(|record| record["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn test_records_missing_envelope_or_key_is_empty() {
        let empty: GraphQLResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(empty.records("items").is_empty());

        let wrong_key: GraphQLResponse =
            serde_json::from_value(serde_json::json!({ "data": { "boards": [] } })).unwrap();
        assert!(wrong_key.records("items").is_empty());

        let non_array: GraphQLResponse =
            serde_json::from_value(serde_json::json!({ "data": { "items": {} } })).unwrap();
        assert!(non_array.records("items").is_empty());
    }

    #[test]
    fn test_error_detection() {
        let rejected: GraphQLResponse = serde_json::from_value(serde_json::json!({
            "errors": [ { "message": "Query has complexity of 5000001" } ]
        }))
        .unwrap();
        assert!(rejected.has_errors());
        assert!(rejected.error_messages().contains("complexity"));

        let clean: GraphQLResponse =
            serde_json::from_value(serde_json::json!({ "data": {} })).unwrap();
        assert!(!clean.has_errors());

        let empty_errors: GraphQLResponse =
            serde_json::from_value(serde_json::json!({ "errors": [] })).unwrap();
        assert!(!empty_errors.has_errors());
    }
}
