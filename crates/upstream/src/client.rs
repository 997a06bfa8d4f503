//! The outbound half of a proxied call.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};

/// Errors raised before or while talking to an upstream service.
///
/// A non-2xx upstream answer is *not* an error at this layer; the caller
/// decides how to relay it.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("Invalid base URL for {family} upstream: {reason}")]
    InvalidBaseUrl { family: &'static str, reason: String },

    #[error("Path parameter {0} missing for upstream path")]
    MissingPathParam(String),

    /// A path parameter that would not survive as its own segment.
    #[error("Path parameter {name} has unusable value {value:?}")]
    InvalidPathParam { name: String, value: String },

    #[error("Invalid authorization header value")]
    InvalidBearer,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Everything needed to issue one upstream request.
#[derive(Debug)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    /// Headers copied from the inbound request.
    pub headers: HeaderMap,
    /// Full `Authorization` value, e.g. `Bearer abc`. `None` omits the header.
    pub bearer: Option<String>,
    /// Serialized JSON body.
    pub json_body: Option<Vec<u8>>,
}

/// Shared upstream HTTP client.
///
/// Cheap to clone; the inner [`reqwest::Client`] pools connections across
/// all upstream families.
#[derive(Debug, Clone, Default)]
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send the request and hand back the raw response, whatever its
    /// status. No retries.
    pub async fn send(&self, request: OutboundRequest) -> Result<reqwest::Response, UpstreamError> {
        let OutboundRequest {
            method,
            url,
            mut headers,
            bearer,
            json_body,
        } = request;

        if let Some(bearer) = bearer {
            let value =
                HeaderValue::from_str(&bearer).map_err(|_| UpstreamError::InvalidBearer)?;
            headers.insert(AUTHORIZATION, value);
        }

        tracing::debug!(%method, %url, has_auth = headers.contains_key(AUTHORIZATION), "Forwarding upstream");

        let mut builder = self.client.request(method, url);
        if let Some(body) = json_body {
            if !headers.contains_key(CONTENT_TYPE) {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            }
            builder = builder.body(body);
        }

        Ok(builder.headers(headers).send().await?)
    }
}
