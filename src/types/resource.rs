//! Resource definitions for the Monday.com API
//!
//! The connector exposes a small closed set of resource collections. Each
//! resource differs only in its pagination setup; everything else about the
//! request cycle is shared.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// One of the five fixed Monday.com resource collections.
///
/// Iteration order (via `strum::IntoEnumIterator`) is the fixed order in
/// which streams are constructed and read: items, boards, teams, updates,
/// users.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Items,
    Boards,
    Teams,
    Updates,
    Users,
}

impl ResourceKind {
    /// Primary key field shared by every resource.
    pub const PRIMARY_KEY: &'static str = "id";

    /// Lowercased resource name. This is both the GraphQL collection name in
    /// queries and the key under `data` in the response envelope.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Boards => "boards",
            Self::Teams => "teams",
            Self::Updates => "updates",
            Self::Users => "users",
        }
    }

    /// GraphQL argument name used to request a later page, or `None` for
    /// resources the API does not paginate (teams, users).
    pub const fn pagination_field(self) -> Option<&'static str> {
        match self {
            Self::Items | Self::Updates => Some("page"),
            Self::Boards => Some("pageInt"),
            Self::Teams | Self::Users => None,
        }
    }
}
