use std::sync::Arc;

use portal_events::EventBus;
use portal_upstream::UpstreamClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: config and bus sit behind `Arc`, and the upstream
/// client is itself a handle onto a shared connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Pooled HTTP client for every upstream family.
    pub upstream: UpstreamClient,
    /// Revalidation events are published here after mutations.
    pub event_bus: Arc<EventBus>,
}
