//! Operational endpoints.

use crate::error::{AppError, ErrorBody, Failure, OrInternal};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode};

/// Re-read the settings file and swap the live snapshot.
#[utoipa::path(
    options,
    path = "/api/operations/reloadconfig",
    tag = "Operations",
    responses(
        (status = 200, description = "Settings reloaded"),
        (status = 500, description = "Something real bad happened.", body = ErrorBody),
    )
)]
pub async fn reload_config(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.settings.reload().await.or_internal(Failure::ReloadConfig)?;
    Ok(StatusCode::OK)
}
