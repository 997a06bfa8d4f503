#![allow(dead_code)]

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, Request, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::mpsc;
use tower::ServiceExt;

use portal_api::auth::token::{issue_token, AuthConfig};
use portal_api::config::ServerConfig;
use portal_api::router::build_app_router;
use portal_api::state::AppState;
use portal_events::{EventBus, RevalidateConfig};
use portal_upstream::{UpstreamBases, UpstreamClient};

// ---------------------------------------------------------------------------
// Fake upstream
// ---------------------------------------------------------------------------

/// A request as the upstream saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    content_type: &'static str,
    body: &'static str,
}

#[derive(Default)]
struct Inner {
    requests: Mutex<Vec<Recorded>>,
    canned: Mutex<HashMap<String, Canned>>,
    stream: Mutex<Option<mpsc::UnboundedReceiver<Bytes>>>,
}

/// Upstream stand-in on an ephemeral local port.
///
/// Records every request. Answers `200 {"ok":true}` unless a canned
/// response was registered for the path, or streams chunks pushed through
/// [`FakeUpstream::stream`].
#[derive(Clone)]
pub struct FakeUpstream {
    pub base_url: String,
    inner: Arc<Inner>,
}

impl FakeUpstream {
    pub async fn start() -> Self {
        let inner = Arc::new(Inner::default());
        let app = Router::new()
            .route("/", any(record))
            .route("/{*path}", any(record))
            .with_state(Arc::clone(&inner));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            inner,
        }
    }

    /// Register a fixed answer for an upstream path.
    pub fn respond(&self, path: &str, status: StatusCode, body: &'static str) {
        self.respond_with_type(path, status, "application/json", body);
    }

    pub fn respond_with_type(
        &self,
        path: &str,
        status: StatusCode,
        content_type: &'static str,
        body: &'static str,
    ) {
        self.inner.canned.lock().unwrap().insert(
            path.to_string(),
            Canned {
                status,
                content_type,
                body,
            },
        );
    }

    /// The next request is answered with an event stream fed by the
    /// returned sender. Dropping the sender ends the stream.
    pub fn stream(&self) -> mpsc::UnboundedSender<Bytes> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.inner.stream.lock().unwrap() = Some(rx);
        tx
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("upstream received no request")
    }
}

async fn record(
    State(inner): State<Arc<Inner>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    inner.requests.lock().unwrap().push(Recorded {
        method,
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    if let Some(rx) = inner.stream.lock().unwrap().take() {
        let chunks = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|chunk| (Ok::<_, Infallible>(chunk), rx))
        });
        return Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "text/event-stream")
            .body(Body::from_stream(chunks))
            .unwrap();
    }

    let canned = inner.canned.lock().unwrap().get(&path).cloned();
    match canned {
        Some(c) => (c.status, [(CONTENT_TYPE, c.content_type)], c.body).into_response(),
        None => (
            StatusCode::OK,
            [(CONTENT_TYPE, "application/json")],
            r#"{"ok":true}"#,
        )
            .into_response(),
    }
}

// ---------------------------------------------------------------------------
// App under test
// ---------------------------------------------------------------------------

pub fn test_auth() -> AuthConfig {
    AuthConfig {
        secret: "integration-test-secret-long-enough-for-hmac".to_string(),
        issuer: None,
        audience: None,
    }
}

/// Build a test `ServerConfig` pointing every upstream family at `base`.
pub fn test_config(base: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        upstreams: UpstreamBases::uniform(base).unwrap(),
        cdn_url: None,
        auth: test_auth(),
        revalidate: RevalidateConfig::default(),
    }
}

/// Full application router (same middleware stack as production) plus the
/// event bus it publishes to.
pub fn build_test_app(base: &str) -> (Router, Arc<EventBus>) {
    build_test_app_with(test_config(base))
}

pub fn build_test_app_with(config: ServerConfig) -> (Router, Arc<EventBus>) {
    let event_bus = Arc::new(EventBus::default());
    let state = AppState {
        config: Arc::new(config.clone()),
        upstream: UpstreamClient::new(),
        event_bus: Arc::clone(&event_bus),
    };
    (build_app_router(state, &config), event_bus)
}

/// A signed session token for a test user.
pub fn token(groups: &[&str]) -> String {
    issue_token("user-1", Some("user@example.com"), groups, 15, &test_auth()).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_authed(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: &str,
) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn body_bytes(response: Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Base URL of a port nothing listens on.
pub async fn dead_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
