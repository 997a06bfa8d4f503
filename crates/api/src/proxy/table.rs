//! The portal's proxy route table.

use axum::routing::MethodFilter;
use portal_core::query::QueryPolicy;
use portal_core::schema::{ResponseSchema, SchemaCheck};
use portal_upstream::Upstream;

use super::route::{ProxyRoute, SideEffect};

/// Rendered pages that show project data.
const PROJECT_PAGES: &[&str] = &["/dashboard", "/projects"];

const PAGING: &[&str] = &["page", "size"];

/// Every proxied route, relative to `/api`.
pub fn route_table() -> Vec<ProxyRoute> {
    let get = MethodFilter::GET;
    let get_post = MethodFilter::GET.or(MethodFilter::POST);

    vec![
        // --- Blog ---
        ProxyRoute::new("/blog", get, Upstream::Blog, "/posts")
            .query(QueryPolicy::allow(&["page", "size", "tag"]))
            .schema(SchemaCheck::many(ResponseSchema::BlogPost)),
        ProxyRoute::new("/blog/{slug}", get, Upstream::Blog, "/posts/{slug}")
            .schema(SchemaCheck::one(ResponseSchema::BlogPost)),
        // --- Help center ---
        ProxyRoute::new("/help", get, Upstream::Help, "/articles")
            .query(QueryPolicy::allow(&["page", "size", "category"]))
            .schema(SchemaCheck::many(ResponseSchema::HelpArticle)),
        ProxyRoute::new("/help/search", get, Upstream::Help, "/articles/search")
            .query(QueryPolicy::new(PAGING, &["keyword"]))
            .schema(SchemaCheck::many(ResponseSchema::HelpArticle)),
        ProxyRoute::new("/help/{id}", get, Upstream::Help, "/articles/{id}")
            .schema(SchemaCheck::one(ResponseSchema::HelpArticle)),
        // --- Alerts ---
        ProxyRoute::new("/alerts", get, Upstream::User, "/alerts")
            .query(QueryPolicy::allow(&["page", "size", "read"]))
            .authenticated()
            .schema(SchemaCheck::many(ResponseSchema::Alert)),
        ProxyRoute::new("/alerts/{id}", MethodFilter::PATCH, Upstream::User, "/alerts/{id}")
            .authenticated(),
        // --- Projects ---
        ProxyRoute::new("/projects", get_post, Upstream::Project, "/projects")
            .query(QueryPolicy::allow(&["page", "size", "status"]))
            .authenticated()
            .side_effect(SideEffect::Revalidate(PROJECT_PAGES)),
        ProxyRoute::new(
            "/projects/{id}",
            MethodFilter::GET
                .or(MethodFilter::PUT)
                .or(MethodFilter::DELETE),
            Upstream::Project,
            "/projects/{id}",
        )
        .authenticated()
        .side_effect(SideEffect::Revalidate(PROJECT_PAGES)),
        ProxyRoute::new("/projects/{id}/tasks", get, Upstream::Project, "/projects/{id}/tasks")
            .query(QueryPolicy::allow(PAGING))
            .authenticated()
            .schema(SchemaCheck::many(ResponseSchema::Task)),
        ProxyRoute::new(
            "/projects/{id}/estimate/stream",
            get,
            Upstream::Project,
            "/projects/{id}/estimate/stream",
        )
        .authenticated()
        .event_stream(),
        ProxyRoute::new("/estimate", MethodFilter::POST, Upstream::Project, "/estimates/generate")
            .authenticated()
            .event_stream(),
        // --- Contracts ---
        ProxyRoute::new("/contracts", get_post, Upstream::Project, "/contracts")
            .query(QueryPolicy::allow(&["page", "size", "projectId"]))
            .authenticated(),
        ProxyRoute::new("/contracts/{id}", get, Upstream::Project, "/contracts/{id}")
            .authenticated()
            .schema(SchemaCheck::one(ResponseSchema::Contract)),
        // --- Payments ---
        ProxyRoute::new("/payments", MethodFilter::POST, Upstream::Payment, "/payments")
            .authenticated()
            .schema(SchemaCheck::one(ResponseSchema::Payment)),
        ProxyRoute::new("/payments/{id}", get, Upstream::Payment, "/payments/{id}")
            .authenticated()
            .schema(SchemaCheck::one(ResponseSchema::Payment)),
        // --- Object storage ---
        ProxyRoute::new(
            "/storage/presigned-url",
            MethodFilter::POST,
            Upstream::Cloud,
            "/presigned-url",
        )
        .query(QueryPolicy::new(&[], &["fileName", "contentType"]))
        .authenticated()
        .schema(SchemaCheck::one(ResponseSchema::PresignedUpload)),
        // --- Welfare recommendations ---
        ProxyRoute::new("/welfare", get, Upstream::Welfare, "/recommendations")
            .query(QueryPolicy::new(&["age", "page", "size"], &["region"]))
            .schema(SchemaCheck::many(ResponseSchema::WelfareListing)),
        // --- Current user ---
        ProxyRoute::new("/users/me", get, Upstream::User, "/users/me").authenticated(),
        ProxyRoute::new(
            "/users/me/onboarding",
            MethodFilter::PUT,
            Upstream::User,
            "/users/me/onboarding",
        )
        .authenticated()
        .side_effect(SideEffect::OnboardingCookie),
    ]
}
