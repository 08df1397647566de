/// Monday.com API layer: auth resolution, HTTP client, retry
/// classification, GraphQL queries, and paginated resource streams
pub mod monday;

/// Core services for connection checking and full-refresh synchronization
pub mod services;

/// Core type definitions and domain models used throughout the library
pub mod types;
