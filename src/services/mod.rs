//! Connector services: connection checking, stream-list construction, and
//! the full-refresh sync driver.

pub mod source;
pub mod sync;

pub use source::MondaySource;
pub use sync::{SyncRunner, SyncSummary};
