pub mod health;

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, Method};
use axum::response::IntoResponse;
use axum::routing::on;
use axum::Router;

use crate::error::AppError;
use crate::middleware::session::CurrentSession;
use crate::proxy::forward::{forward, Inbound};
use crate::proxy::table::route_table;
use crate::proxy::ProxyRoute;
use crate::state::AppState;

/// Build the `/api` route tree from the proxy route table.
///
/// Route hierarchy:
///
/// ```text
/// /blog                              GET             blog      (public)
/// /blog/{slug}                       GET             blog      (public)
/// /help                              GET             help      (public)
/// /help/search                       GET             help      (public, keyword required)
/// /help/{id}                         GET             help      (public)
/// /alerts                            GET             user
/// /alerts/{id}                       PATCH           user
/// /projects                          GET, POST       project   (revalidates)
/// /projects/{id}                     GET, PUT, DEL   project   (revalidates)
/// /projects/{id}/tasks               GET             project
/// /projects/{id}/estimate/stream     GET             project   (event stream)
/// /estimate                          POST            project   (event stream)
/// /contracts                         GET, POST       project
/// /contracts/{id}                    GET             project
/// /payments                          POST            payment
/// /payments/{id}                     GET             payment
/// /storage/presigned-url             POST            cloud     (fileName, contentType required)
/// /welfare                           GET             welfare   (public, region required)
/// /users/me                          GET             user
/// /users/me/onboarding               PUT             user      (sets onboarding cookie)
/// ```
pub fn api_routes() -> Router<AppState> {
    route_table()
        .into_iter()
        .fold(Router::new(), mount)
}

fn mount(router: Router<AppState>, route: ProxyRoute) -> Router<AppState> {
    let path = route.path;
    let methods = route.methods;
    let route = Arc::new(route);

    let handler = move |State(state): State<AppState>,
                        CurrentSession(session): CurrentSession,
                        method: Method,
                        path_params: Option<Path<HashMap<String, String>>>,
                        query: Result<Query<Vec<(String, String)>>, QueryRejection>,
                        headers: HeaderMap,
                        body: Bytes| {
        let route = Arc::clone(&route);
        async move {
            let query = match query {
                Ok(Query(pairs)) => pairs,
                Err(rejection) => {
                    return AppError::BadRequest(rejection.body_text()).into_response();
                }
            };

            let inbound = Inbound {
                method,
                path_params: path_params.map(|Path(p)| p).unwrap_or_default(),
                query,
                headers,
                body,
            };

            forward(&state, &route, session, inbound)
                .await
                .unwrap_or_else(IntoResponse::into_response)
        }
    };

    router.route(path, on(methods, handler))
}
