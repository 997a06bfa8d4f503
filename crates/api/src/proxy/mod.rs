//! The backend-proxy convention.
//!
//! Every API route is a [`ProxyRoute`] value: plain data describing which
//! upstream serves it, which query keys pass through, whether a session is
//! required, how the response is relayed and what happens after success.
//! A single function, [`forward::forward`], executes any of them.

pub mod cookie;
pub mod forward;
pub mod route;
pub mod table;

pub use route::{AuthRequirement, ProxyRoute, ResponseMode, SideEffect};
