//! Monday.com API layer: credential resolution, the HTTP client with its
//! retry engine, response classification, GraphQL query construction, and
//! the paginated resource streams.

pub mod auth;
pub mod client;
pub mod error;
pub mod graphql;
pub mod stream;

pub use client::MondayClient;
pub use stream::ResourceStream;
