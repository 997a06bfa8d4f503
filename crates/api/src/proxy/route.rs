use axum::routing::MethodFilter;
use portal_core::query::QueryPolicy;
use portal_core::schema::SchemaCheck;
use portal_upstream::Upstream;

/// Whether a route may be called without a signed-in session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    Public,
    Required,
}

/// How a successful upstream body is relayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Read fully, optionally schema-checked, relayed unmodified.
    Json,
    /// `text/event-stream`, relayed chunk by chunk as it arrives.
    EventStream,
}

/// Extra work done only after the upstream reports success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    None,
    /// Set the long-lived onboarding-dismissed cookie.
    OnboardingCookie,
    /// Publish a revalidation event for these rendered paths on mutations.
    Revalidate(&'static [&'static str]),
}

/// One entry of the proxy route table.
#[derive(Debug, Clone)]
pub struct ProxyRoute {
    /// Inbound path relative to `/api`, in axum syntax.
    pub path: &'static str,
    pub methods: MethodFilter,
    pub upstream: Upstream,
    /// Upstream path template; `{name}` segments take path parameters.
    pub upstream_path: &'static str,
    pub query: QueryPolicy,
    pub auth: AuthRequirement,
    pub mode: ResponseMode,
    pub schema: Option<SchemaCheck>,
    pub side_effect: SideEffect,
}

impl ProxyRoute {
    /// A public JSON route with no query parameters and no side effect.
    pub fn new(
        path: &'static str,
        methods: MethodFilter,
        upstream: Upstream,
        upstream_path: &'static str,
    ) -> Self {
        Self {
            path,
            methods,
            upstream,
            upstream_path,
            query: QueryPolicy::NONE,
            auth: AuthRequirement::Public,
            mode: ResponseMode::Json,
            schema: None,
            side_effect: SideEffect::None,
        }
    }

    pub fn query(mut self, query: QueryPolicy) -> Self {
        self.query = query;
        self
    }

    pub fn authenticated(mut self) -> Self {
        self.auth = AuthRequirement::Required;
        self
    }

    pub fn event_stream(mut self) -> Self {
        self.mode = ResponseMode::EventStream;
        self
    }

    pub fn schema(mut self, schema: SchemaCheck) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn side_effect(mut self, side_effect: SideEffect) -> Self {
        self.side_effect = side_effect;
        self
    }
}
