//! Router assembly.

pub mod camps;
pub mod common;
pub mod operations;

pub use camps::camp_routes;
pub use common::common_routes;
pub use operations::operations_routes;

use crate::error::ErrorBody;
use crate::extractors::negotiate_version;
use crate::links::API_BASE;
use crate::openapi::get_openapi_json;
use crate::state::AppState;
use axum::{http::StatusCode, middleware, routing::get, Json, Router};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

async fn no_route() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("not_found", "no route matches the request")),
    )
}

/// Versioned API routes under `/api`. Every supported version is served by the same handlers.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(camp_routes())
        .merge(operations_routes())
        .layer(middleware::from_fn(negotiate_version))
}

/// The whole application: `/api/...`, common routes, and the OpenAPI document.
pub fn app_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .nest(API_BASE, api_routes())
        .merge(common_routes())
        .route("/swagger/v2/swagger.json", get(get_openapi_json))
        .fallback(no_route)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
