//! Paginated record streams, one per resource collection.
//!
//! Every stream runs the same request cycle: build a query from the
//! resource's field fragment and the current page token, execute it, parse
//! the record sequence out of the response envelope, and derive the next
//! page token. Pages are fetched strictly sequentially because each page's
//! request depends on the previous page's record count. The per-resource
//! differences are confined to the pagination setup carried by
//! [`ResourceKind`].

use std::path::Path;

use anyhow::{Context, Result};
use futures::stream::{self, Stream, TryStreamExt};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::monday::client::MondayClient;
use crate::monday::error;
use crate::monday::graphql::schema::{self, SchemaError};
use crate::monday::graphql::{self, GraphQLQuery, GraphQLResponse};
use crate::types::ResourceKind;

/// GraphQL argument pair requesting a later page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageToken {
    pub field: &'static str,
    pub page: u64,
}

impl PageToken {
    pub fn as_arguments(&self) -> Vec<(&'static str, String)> {
        vec![(self.field, self.page.to_string())]
    }
}

/// Page-cursor state for one stream instance.
///
/// The counter starts at 1 and only ever advances; it is bumped on every
/// parsed response, whether or not that page held records. Resources the
/// API does not paginate carry no cursor at all and so never produce a
/// token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paginator {
    Page { field: &'static str, page: u64 },
    Disabled,
}

impl Paginator {
    pub fn for_resource(resource: ResourceKind) -> Self {
        match resource.pagination_field() {
            Some(field) => Self::Page { field, page: 1 },
            None => Self::Disabled,
        }
    }

    /// Current page number, or `None` when pagination is disabled.
    pub fn current_page(&self) -> Option<u64> {
        match self {
            Self::Page { page, .. } => Some(*page),
            Self::Disabled => None,
        }
    }

    fn advance(&mut self, page_had_records: bool) -> Option<PageToken> {
        match self {
            Self::Disabled => None,
            Self::Page { field, page } => {
                *page += 1;
                page_had_records.then(|| PageToken {
                    field: *field,
                    page: *page,
                })
            }
        }
    }
}

/// One resource collection read as a sequence of pages.
pub struct ResourceStream {
    client: MondayClient,
    resource: ResourceKind,
    field_fragment: String,
    paginator: Paginator,
}

impl ResourceStream {
    /// Construct the stream, loading the resource's field schema once.
    ///
    /// The schema document is immutable, so the flattened fragment is
    /// cached for the stream's lifetime. A missing or malformed document
    /// fails here, before any network traffic.
    pub fn new(
        client: MondayClient,
        resource: ResourceKind,
        schema_dir: Option<&Path>,
    ) -> Result<Self, SchemaError> {
        let field_fragment = match schema_dir {
            Some(dir) => schema::graphql_fields_from_dir(dir, resource)?,
            None => schema::graphql_fields(resource)?,
        };

        Ok(Self {
            client,
            resource,
            field_fragment,
            paginator: Paginator::for_resource(resource),
        })
    }

    pub fn resource(&self) -> ResourceKind {
        self.resource
    }

    pub fn field_fragment(&self) -> &str {
        &self.field_fragment
    }

    pub const fn primary_key(&self) -> &'static str {
        ResourceKind::PRIMARY_KEY
    }

    /// Current page number, or `None` when this resource is unpaginated.
    pub fn current_page(&self) -> Option<u64> {
        self.paginator.current_page()
    }

    /// Build the request query for the given page token.
    pub fn request_query(&self, token: Option<&PageToken>) -> GraphQLQuery {
        let arguments = token.map(PageToken::as_arguments).unwrap_or_default();
        graphql::resource_query(self.resource.name(), &self.field_fragment, &arguments)
    }

    /// Record sequence under `data.<resource name>`, in server order.
    /// A missing envelope or key yields an empty sequence, not an error.
    pub fn parse_response(&self, response: &GraphQLResponse) -> Vec<Value> {
        response.records(self.resource.name())
    }

    /// Derive the token for the next page and advance the page counter.
    ///
    /// The counter is bumped on every response, but a token is produced
    /// only when the page held records; `None` signals the end of
    /// pagination to the driver. Unpaginated resources always return
    /// `None`, so they issue at most one request.
    pub fn next_page_token(&mut self, response: &GraphQLResponse) -> Option<PageToken> {
        let page_had_records = !self.parse_response(response).is_empty();
        self.paginator.advance(page_had_records)
    }

    /// Retry predicate for one response of this stream.
    pub fn should_retry(status: StatusCode, response: &GraphQLResponse) -> bool {
        error::should_retry(status, response)
    }

    /// Fetch one page: execute the query for `token`, parse the records,
    /// and derive the token for the following page.
    pub async fn fetch_page(
        &mut self,
        token: Option<&PageToken>,
    ) -> Result<(Vec<Value>, Option<PageToken>)> {
        let query = self.request_query(token);
        let response = self
            .client
            .execute_query(self.resource.name(), &query)
            .await
            .with_context(|| format!("Failed to read a page of stream {}", self.resource))?;

        let records = self.parse_response(&response);
        let next_token = self.next_page_token(&response);
        debug!(
            "Stream {} page yielded {} records, next token: {:?}",
            self.resource,
            records.len(),
            next_token
        );

        Ok((records, next_token))
    }

    /// All records of this resource as a stream, fetching pages strictly
    /// sequentially until a page produces no further token.
    pub fn into_records(self) -> impl Stream<Item = Result<Value>> {
        struct ReadState {
            stream: ResourceStream,
            token: Option<PageToken>,
            exhausted: bool,
        }

        stream::try_unfold(
            ReadState {
                stream: self,
                token: None,
                exhausted: false,
            },
            |mut state| async move {
                if state.exhausted {
                    return Ok::<_, anyhow::Error>(None);
                }

                let token = state.token.take();
                let (records, next_token) = state.stream.fetch_page(token.as_ref()).await?;
                state.exhausted = next_token.is_none();
                state.token = next_token;

                Ok(Some((
                    stream::iter(records.into_iter().map(Ok::<_, anyhow::Error>)),
                    state,
                )))
            },
        )
        .try_flatten()
    }

    /// Drain the stream into memory. Mostly useful for small resources and
    /// tests; `read` syncs go through [`Self::into_records`].
    pub async fn read_all(self) -> Result<Vec<Value>> {
        self.into_records().try_collect().await
    }
}

impl std::fmt::Debug for ResourceStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStream")
            .field("resource", &self.resource)
            .field("paginator", &self.paginator)
            .finish_non_exhaustive()
    }
}
