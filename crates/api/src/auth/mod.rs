//! Identity-provider token handling.
//!
//! - [`token`] -- session token claims, validation and issuance.

pub mod token;
