//! Camp handlers: list, search, get, create, update, delete.

use crate::error::{AppError, ErrorBody, Failure, OrInternal};
use crate::handlers::{json_body, query_params};
use crate::links;
use crate::mapping::camp_models;
use crate::model::CampModel;
use crate::response::{not_found_with, ok, Created, Listing};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    #[serde(default)]
    pub include_talks: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`.
    #[param(value_type = Option<String>)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub include_talks: bool,
}

/// Day named by an `eventDate` query value. A timestamp off midnight names no
/// camp day and yields `None`.
fn search_day(raw: &str) -> Result<Option<NaiveDate>, AppError> {
    let raw = raw.trim();
    if let Ok(day) = raw.parse::<NaiveDate>() {
        return Ok(Some(day));
    }
    let at = raw
        .parse::<NaiveDateTime>()
        .map_err(|_| AppError::BadRequest(format!("eventDate is not a date: {}", raw)))?;
    Ok((at.num_seconds_from_midnight() == 0 && at.nanosecond() == 0).then(|| at.date()))
}

fn camp_not_found(moniker: &str) -> AppError {
    AppError::NotFound(format!("No camp found matching moniker: {}", moniker))
}

#[utoipa::path(
    get,
    path = "/api/camps",
    tag = "Camps",
    params(ListParams),
    responses(
        (status = 200, description = "All camps", body = Listing<CampModel>),
        (status = 400, description = "Malformed query string", body = ErrorBody),
        (status = 500, description = "Database Failure", body = ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let params = query_params(params)?;
    let camps = state
        .repository
        .all_camps(params.include_talks)
        .await
        .or_internal(Failure::Database)?;
    Ok(ok(Listing::new(camp_models(&camps))))
}

#[utoipa::path(
    get,
    path = "/api/camps/{moniker}",
    tag = "Camps",
    params(("moniker" = String, Path, description = "Camp moniker")),
    responses(
        (status = 200, description = "The camp", body = CampModel),
        (status = 404, description = "No such camp", body = ErrorBody),
        (status = 500, description = "Database Failure", body = ErrorBody),
    )
)]
pub async fn get_by_moniker(
    State(state): State<AppState>,
    Path(moniker): Path<String>,
) -> Result<Json<CampModel>, AppError> {
    let camp = state
        .repository
        .camp(&moniker, false)
        .await
        .or_internal(Failure::Database)?
        .ok_or_else(|| camp_not_found(&moniker))?;
    Ok(Json(CampModel::from(&camp)))
}

/// An empty match is a 404 whose body is the empty result set. A missing date matches nothing.
#[utoipa::path(
    get,
    path = "/api/camps/search",
    tag = "Camps",
    params(SearchParams),
    responses(
        (status = 200, description = "Camps on that date", body = Vec<CampModel>),
        (status = 400, description = "Malformed query string", body = ErrorBody),
        (status = 404, description = "No camps on that date (body is [])", body = Vec<CampModel>),
        (status = 500, description = "Database Failure", body = ErrorBody),
    )
)]
pub async fn search_by_date(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let params = query_params(params)?;
    let day = match params.event_date.as_deref() {
        Some(raw) => search_day(raw)?,
        None => None,
    };
    let Some(day) = day else {
        return Ok(not_found_with(Vec::<CampModel>::new()));
    };
    let camps = state
        .repository
        .camps_by_event_date(day, params.include_talks)
        .await
        .or_internal(Failure::Database)?;
    let models = camp_models(&camps);
    if models.is_empty() {
        return Ok(not_found_with(models));
    }
    Ok(ok(models))
}

#[utoipa::path(
    post,
    path = "/api/camps",
    tag = "Camps",
    request_body = CampModel,
    responses(
        (status = 201, description = "Created; Location points at the camp", body = CampModel),
        (status = 400, description = "Invalid model, moniker not unique or not routable, or save declined", body = ErrorBody),
        (status = 500, description = "Failed to create resource", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CampModel>, JsonRejection>,
) -> Result<Created<CampModel>, AppError> {
    let model = json_body(payload)?;
    RequestValidator::validate_camp(&model)?;
    let repo = state.repository.as_ref();

    let existing = repo.camp(&model.moniker, false).await.or_internal(Failure::CreateResource)?;
    if existing.is_some() {
        return Err(AppError::BadRequest("Moniker not unique".into()));
    }
    let location = links::camp_location(&model.moniker)
        .ok_or_else(|| AppError::BadRequest("Could not use current moniker.".into()))?;

    let saved = repo
        .add_camp(&model.to_entity())
        .await
        .or_internal(Failure::CreateResource)?
        .ok_or_else(AppError::save_failed)?;
    tracing::info!(moniker = %saved.moniker, camp_id = saved.camp_id, "camp created");
    Ok(Created {
        location: Some(location),
        body: CampModel::from(&saved),
    })
}

/// The camp is looked up by the moniker in the body; the route moniker only appears in the 404 message.
#[utoipa::path(
    put,
    path = "/api/camps/{moniker}",
    tag = "Camps",
    params(("moniker" = String, Path, description = "Camp moniker")),
    request_body = CampModel,
    responses(
        (status = 200, description = "Updated camp", body = CampModel),
        (status = 400, description = "Invalid model or save declined", body = ErrorBody),
        (status = 404, description = "No such camp", body = ErrorBody),
        (status = 500, description = "Failed to update resource", body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(moniker): Path<String>,
    payload: Result<Json<CampModel>, JsonRejection>,
) -> Result<Json<CampModel>, AppError> {
    let model = json_body(payload)?;
    RequestValidator::validate_camp(&model)?;
    let repo = state.repository.as_ref();

    let mut camp = repo
        .camp(&model.moniker, false)
        .await
        .or_internal(Failure::UpdateResource)?
        .ok_or_else(|| camp_not_found(&moniker))?;
    model.apply_to(&mut camp);

    let saved = repo
        .update_camp(&camp)
        .await
        .or_internal(Failure::UpdateResource)?
        .ok_or_else(|| AppError::SaveFailed("Base fail condition".into()))?;
    tracing::info!(moniker = %saved.moniker, "camp updated");
    Ok(Json(CampModel::from(&saved)))
}

#[utoipa::path(
    delete,
    path = "/api/camps/{moniker}",
    tag = "Camps",
    params(("moniker" = String, Path, description = "Camp moniker")),
    responses(
        (status = 200, description = "Deleted along with its talks"),
        (status = 400, description = "Delete declined", body = ErrorBody),
        (status = 404, description = "No such camp", body = ErrorBody),
        (status = 500, description = "Failed to update resource", body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(moniker): Path<String>,
) -> Result<StatusCode, AppError> {
    let repo = state.repository.as_ref();
    let camp = repo
        .camp(&moniker, false)
        .await
        .or_internal(Failure::UpdateResource)?
        .ok_or_else(|| camp_not_found(&moniker))?;
    if !repo.delete_camp(camp.camp_id).await.or_internal(Failure::UpdateResource)? {
        return Err(AppError::save_failed());
    }
    tracing::info!(moniker = %moniker, "camp deleted");
    Ok(StatusCode::OK)
}
