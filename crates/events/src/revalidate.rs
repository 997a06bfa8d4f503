//! Delivery of [`RevalidationEvent`]s to the rendering tier.
//!
//! The dispatcher makes a single POST attempt per event. A failed delivery
//! is logged and dropped: stale pages expire on their own, so the proxy
//! never blocks or retries on their account.

use std::time::Duration;

use tokio::sync::broadcast;

use crate::bus::RevalidationEvent;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Where revalidation notices are sent.
#[derive(Debug, Clone, Default)]
pub struct RevalidateConfig {
    /// Revalidation hook URL. `None` means events are only logged.
    pub url: Option<String>,
    /// Bearer secret expected by the hook.
    pub secret: Option<String>,
}

impl RevalidateConfig {
    /// Load from `REVALIDATE_URL` and `REVALIDATE_SECRET`; both optional.
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            url: non_empty("REVALIDATE_URL"),
            secret: non_empty("REVALIDATE_SECRET"),
        }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RevalidationError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The hook returned a non-2xx status code.
    #[error("Revalidation hook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// RevalidationDispatcher
// ---------------------------------------------------------------------------

pub struct RevalidationDispatcher {
    client: reqwest::Client,
    config: RevalidateConfig,
}

impl RevalidationDispatcher {
    pub fn new(config: RevalidateConfig) -> Result<Self, RevalidationError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }

    /// Consume events until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<RevalidationEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.deliver(&event).await {
                        tracing::warn!(
                            paths = ?event.paths,
                            reason = %event.reason,
                            error = %e,
                            "Revalidation delivery failed"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Revalidation dispatcher lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, revalidation dispatcher stopping");
                    break;
                }
            }
        }
    }

    /// Deliver one event to the configured hook.
    pub async fn deliver(&self, event: &RevalidationEvent) -> Result<(), RevalidationError> {
        let Some(url) = self.config.url.as_deref() else {
            tracing::debug!(paths = ?event.paths, reason = %event.reason, "No revalidation hook configured");
            return Ok(());
        };

        let payload = serde_json::json!({
            "paths": event.paths,
            "reason": event.reason,
            "timestamp": event.timestamp,
        });

        let mut request = self.client.post(url).json(&payload);
        if let Some(secret) = self.config.secret.as_deref() {
            request = request.bearer_auth(secret);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(RevalidationError::HttpStatus(response.status().as_u16()));
        }

        tracing::info!(paths = ?event.paths, "Revalidation delivered");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
