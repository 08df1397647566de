//! Core type definitions for the connector: configuration, the fixed
//! resource set, and the emitted record envelope.

pub mod config;
pub mod record;
pub mod resource;

pub use config::*;
pub use record::*;
pub use resource::*;
