//! HTTP client side of the portal proxy.
//!
//! Wraps [`reqwest`] with the pieces every proxied call needs: resolving
//! which upstream family serves a route, building the target URL from a
//! path template, selecting which inbound headers travel upstream, and
//! issuing the request.

pub mod client;
pub mod family;
pub mod headers;
pub mod target;

pub use client::{OutboundRequest, UpstreamClient, UpstreamError};
pub use family::{Upstream, UpstreamBases};
