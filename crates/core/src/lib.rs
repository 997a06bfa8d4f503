//! Domain building blocks shared by the portal proxy crates.
//!
//! Nothing in here performs I/O: sessions, query policies and resource
//! schemas are plain data plus pure checks, so the HTTP layer and the
//! upstream client can both depend on them.

pub mod error;
pub mod groups;
pub mod query;
pub mod schema;
pub mod session;
pub mod types;
