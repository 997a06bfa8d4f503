//! Request extractors.
//!
//! - [`session::CurrentSession`] -- Resolves the caller's session from a
//!   bearer token or session cookie. Never rejects.

pub mod session;
