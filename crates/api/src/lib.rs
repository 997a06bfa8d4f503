//! Portal API server library.
//!
//! Exposes the building blocks (config, state, error handling, session
//! resolution, the proxy route table) so integration tests and the binary
//! entrypoint can both access them.

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod proxy;
pub mod router;
pub mod routes;
pub mod state;
