//! Portal event bus and cache revalidation delivery.
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`RevalidationEvent`] — "these rendered paths are stale" notice
//!   published after a successful mutation.
//! - [`RevalidationDispatcher`] — background service that forwards each
//!   event to the rendering tier's revalidation hook.

pub mod bus;
pub mod revalidate;

pub use bus::{EventBus, RevalidationEvent};
pub use revalidate::{RevalidateConfig, RevalidationDispatcher, RevalidationError};
