//! Well-known identity-provider group names.
//!
//! These must match the group names configured in the identity provider's
//! user pool.

pub const GROUP_ADMIN: &str = "admin";
