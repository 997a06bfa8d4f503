//! Executes a [`ProxyRoute`] against its upstream.

use std::collections::HashMap;

use axum::body::{Body, Bytes};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::Response;
use futures::TryStreamExt;
use portal_core::error::CoreError;
use portal_core::session::Session;
use portal_events::RevalidationEvent;
use portal_upstream::headers::forwarded_headers;
use portal_upstream::target::build_target_url;
use portal_upstream::{OutboundRequest, UpstreamError};

use super::cookie::onboarding_cookie;
use super::route::{AuthRequirement, ProxyRoute, ResponseMode, SideEffect};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The parts of an inbound request a proxy route consumes.
#[derive(Debug, Default)]
pub struct Inbound {
    pub method: Method,
    pub path_params: HashMap<String, String>,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Forward one inbound request according to `route` and relay the answer.
///
/// Checks run in a fixed order and stop at the first failure, before any
/// upstream call is made: the auth gate first (401), then required query
/// keys and malformed JSON (400), then unusable path parameters (400). An
/// anonymous caller on a protected route therefore always sees 401.
pub async fn forward(
    state: &AppState,
    route: &ProxyRoute,
    session: Session,
    inbound: Inbound,
) -> AppResult<Response> {
    if route.auth == AuthRequirement::Required && !session.is_authenticated() {
        return Err(CoreError::Unauthorized("Sign-in required".into()).into());
    }

    let query = route.query.apply(&inbound.query)?;
    let json_body = reserialize_json(&inbound.body)?;

    let url = build_target_url(
        state.config.upstreams.get(route.upstream),
        route.upstream_path,
        &inbound.path_params,
        &query,
    )?;

    let upstream = state
        .upstream
        .send(OutboundRequest {
            method: inbound.method.clone(),
            url,
            headers: forwarded_headers(&inbound.headers),
            bearer: session.bearer(),
            json_body,
        })
        .await?;

    let status = upstream.status();
    if !status.is_success() {
        tracing::warn!(
            route = route.path,
            method = %inbound.method,
            upstream = route.upstream.name(),
            %status,
            "Upstream returned non-success status"
        );
        return Err(AppError::UpstreamStatus(status));
    }

    let mut response = match route.mode {
        ResponseMode::Json => relay_json(route, status, upstream).await?,
        ResponseMode::EventStream => relay_event_stream(route, status, upstream)?,
    };

    apply_side_effect(state, route, &inbound.method, &mut response);

    tracing::debug!(
        route = route.path,
        method = %inbound.method,
        %status,
        "Proxied request"
    );

    Ok(response)
}

/// Parse a non-empty body as JSON and serialize it again.
fn reserialize_json(body: &Bytes) -> AppResult<Option<Vec<u8>>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| CoreError::Validation(format!("Request body is not valid JSON: {e}")))?;
    serde_json::to_vec(&value)
        .map(Some)
        .map_err(|e| AppError::InternalError(e.to_string()))
}

async fn relay_json(
    route: &ProxyRoute,
    status: StatusCode,
    upstream: reqwest::Response,
) -> AppResult<Response> {
    let content_type = upstream
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let body = upstream.bytes().await.map_err(UpstreamError::from)?;

    if let Some(check) = &route.schema {
        check.check(&body)?;
    }

    build_response(status, content_type, Body::from(body))
}

fn relay_event_stream(
    route: &ProxyRoute,
    status: StatusCode,
    upstream: reqwest::Response,
) -> AppResult<Response> {
    let path = route.path;
    let stream = upstream.bytes_stream().inspect_err(move |e| {
        tracing::warn!(route = path, error = %e, "Upstream event stream broke off");
    });

    let mut response = build_response(
        status,
        HeaderValue::from_static("text/event-stream"),
        Body::from_stream(stream),
    )?;
    response
        .headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    Ok(response)
}

fn build_response(status: StatusCode, content_type: HeaderValue, body: Body) -> AppResult<Response> {
    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, content_type)
        .body(body)
        .map_err(|e| AppError::InternalError(e.to_string()))
}

fn apply_side_effect(state: &AppState, route: &ProxyRoute, method: &Method, response: &mut Response) {
    match route.side_effect {
        SideEffect::None => {}
        SideEffect::OnboardingCookie => {
            response
                .headers_mut()
                .append(SET_COOKIE, onboarding_cookie());
        }
        SideEffect::Revalidate(paths) => {
            if is_mutation(method) {
                state.event_bus.publish(RevalidationEvent::new(
                    paths.iter().copied(),
                    format!("{method} /api{}", route.path),
                ));
            }
        }
    }
}

fn is_mutation(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}
