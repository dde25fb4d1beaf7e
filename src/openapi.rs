//! OpenAPI document for the camps API, served at `/swagger/v2/swagger.json`.

use crate::error::{ErrorBody, ErrorDetail};
use crate::model::{CampModel, SpeakerModel, TalkModel};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::OnceLock;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CodeCampFinder",
        version = "v2",
        description = "Camps, their talks, and speakers."
    ),
    paths(
        crate::handlers::camps::list,
        crate::handlers::camps::get_by_moniker,
        crate::handlers::camps::search_by_date,
        crate::handlers::camps::create,
        crate::handlers::camps::update,
        crate::handlers::camps::delete,
        crate::handlers::talks::list,
        crate::handlers::talks::get_one,
        crate::handlers::talks::create,
        crate::handlers::talks::update,
        crate::handlers::talks::delete,
        crate::handlers::operations::reload_config,
    ),
    components(schemas(CampModel, TalkModel, SpeakerModel, ErrorBody, ErrorDetail)),
    tags(
        (name = "Camps", description = "Camp operations"),
        (name = "Talks", description = "Talks nested under a camp"),
        (name = "Operations", description = "Runtime operations"),
    ),
)]
pub struct CampApiDoc;

pub fn openapi() -> utoipa::openapi::OpenApi {
    CampApiDoc::openapi()
}

static OPENAPI_JSON_CACHE: OnceLock<String> = OnceLock::new();

pub fn openapi_json() -> Result<String, serde_json::Error> {
    if let Some(spec) = OPENAPI_JSON_CACHE.get() {
        return Ok(spec.clone());
    }
    let spec = serde_json::to_string_pretty(&openapi())?;
    let _ = OPENAPI_JSON_CACHE.set(spec.clone());
    Ok(spec)
}

pub async fn get_openapi_json() -> Response {
    match openapi_json() {
        Ok(spec) => (StatusCode::OK, [(CONTENT_TYPE, "application/json")], spec).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize OpenAPI document");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
