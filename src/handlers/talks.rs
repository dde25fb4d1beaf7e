//! Talk handlers, nested under a camp moniker. Every unexpected store failure reports "Failed to retrieve resource.".

use crate::error::{AppError, ErrorBody, Failure, OrInternal};
use crate::handlers::json_body;
use crate::links;
use crate::mapping::talk_models;
use crate::model::TalkModel;
use crate::response::Created;
use crate::service::{ReferenceResolver, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

const FAILURE: Failure = Failure::RetrieveResource;

/// Talk ids only match the route when they are integers; anything else is an unknown route.
fn parse_talk_id(raw: &str) -> Result<i32, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("no route for talk id '{}'", raw)))
}

#[utoipa::path(
    get,
    path = "/api/camps/{moniker}/talks",
    tag = "Talks",
    params(("moniker" = String, Path, description = "Camp moniker")),
    responses(
        (status = 200, description = "Talks of the camp with speakers", body = Vec<TalkModel>),
        (status = 500, description = "Failed to retrieve resource.", body = ErrorBody),
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Path(moniker): Path<String>,
) -> Result<Json<Vec<TalkModel>>, AppError> {
    let talks = state
        .repository
        .talks_by_moniker(&moniker, true)
        .await
        .or_internal(FAILURE)?;
    Ok(Json(talk_models(&talks)))
}

#[utoipa::path(
    get,
    path = "/api/camps/{moniker}/talks/{talkId}",
    tag = "Talks",
    params(
        ("moniker" = String, Path, description = "Camp moniker"),
        ("talkId" = i32, Path, description = "Talk id"),
    ),
    responses(
        (status = 200, description = "The talk", body = TalkModel),
        (status = 404, description = "No talk with that moniker and id", body = ErrorBody),
        (status = 500, description = "Failed to retrieve resource.", body = ErrorBody),
    )
)]
pub async fn get_one(
    State(state): State<AppState>,
    Path((moniker, talk_id)): Path<(String, String)>,
) -> Result<Json<TalkModel>, AppError> {
    let talk_id = parse_talk_id(&talk_id)?;
    let talk = state
        .repository
        .talk_by_moniker(&moniker, talk_id, true)
        .await
        .or_internal(FAILURE)?
        .ok_or_else(|| AppError::NotFound("No talk found with that moniker and Id combination.".into()))?;
    Ok(Json(TalkModel::from(&talk)))
}

#[utoipa::path(
    post,
    path = "/api/camps/{moniker}/talks",
    tag = "Talks",
    params(("moniker" = String, Path, description = "Camp moniker")),
    request_body = TalkModel,
    responses(
        (status = 201, description = "Created; Location points at the talk", body = TalkModel),
        (status = 400, description = "Invalid model, unknown camp or speaker, or save declined", body = ErrorBody),
        (status = 500, description = "Failed to retrieve resource.", body = ErrorBody),
    )
)]
pub async fn create(
    State(state): State<AppState>,
    Path(moniker): Path<String>,
    payload: Result<Json<TalkModel>, JsonRejection>,
) -> Result<Created<TalkModel>, AppError> {
    let model = json_body(payload)?;
    RequestValidator::validate_talk(&model)?;
    let repo = state.repository.as_ref();
    let refs = ReferenceResolver::new(repo);

    let camp = refs.camp(&moniker).await?;
    let speaker = refs.speaker(&model).await?.required()?;
    let mut talk = model.to_entity(camp.camp_id);
    talk.speaker = Some(speaker);

    let saved = repo
        .add_talk(&talk)
        .await
        .or_internal(FAILURE)?
        .ok_or_else(|| AppError::SaveFailed("Failed to save new talk.".into()))?;
    tracing::info!(moniker = %moniker, talk_id = saved.talk_id, "talk created");
    Ok(Created {
        location: links::talk_location(&moniker, saved.talk_id),
        body: TalkModel::from(&saved),
    })
}

/// A speaker id that does not resolve leaves the current speaker in place.
#[utoipa::path(
    put,
    path = "/api/camps/{moniker}/talks/{talkId}",
    tag = "Talks",
    params(
        ("moniker" = String, Path, description = "Camp moniker"),
        ("talkId" = i32, Path, description = "Talk id"),
    ),
    request_body = TalkModel,
    responses(
        (status = 200, description = "Updated talk", body = TalkModel),
        (status = 400, description = "Invalid model or save declined", body = ErrorBody),
        (status = 404, description = "Talk not found", body = ErrorBody),
        (status = 500, description = "Failed to retrieve resource.", body = ErrorBody),
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path((moniker, talk_id)): Path<(String, String)>,
    payload: Result<Json<TalkModel>, JsonRejection>,
) -> Result<Json<TalkModel>, AppError> {
    let talk_id = parse_talk_id(&talk_id)?;
    let model = json_body(payload)?;
    RequestValidator::validate_talk(&model)?;
    let repo = state.repository.as_ref();

    let mut talk = repo
        .talk_by_moniker(&moniker, talk_id, true)
        .await
        .or_internal(FAILURE)?
        .ok_or_else(|| AppError::NotFound("Talk not found.".into()))?;
    model.apply_to(&mut talk);
    if let Some(speaker) = ReferenceResolver::new(repo).speaker(&model).await?.found() {
        talk.speaker = Some(speaker);
    }

    let saved = repo
        .update_talk(&talk)
        .await
        .or_internal(FAILURE)?
        .ok_or_else(AppError::save_failed)?;
    tracing::info!(moniker = %moniker, talk_id, "talk updated");
    Ok(Json(TalkModel::from(&saved)))
}

#[utoipa::path(
    delete,
    path = "/api/camps/{moniker}/talks/{talkId}",
    tag = "Talks",
    params(
        ("moniker" = String, Path, description = "Camp moniker"),
        ("talkId" = i32, Path, description = "Talk id"),
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Failed to delete talk.", body = ErrorBody),
        (status = 404, description = "Talk not found", body = ErrorBody),
        (status = 500, description = "Failed to retrieve resource.", body = ErrorBody),
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path((moniker, talk_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let talk_id = parse_talk_id(&talk_id)?;
    let repo = state.repository.as_ref();
    let talk = repo
        .talk_by_moniker(&moniker, talk_id, false)
        .await
        .or_internal(FAILURE)?
        .ok_or_else(|| AppError::NotFound("Talk not found.".into()))?;
    if !repo.delete_talk(talk.talk_id).await.or_internal(FAILURE)? {
        return Err(AppError::SaveFailed("Failed to delete talk.".into()));
    }
    tracing::info!(moniker = %moniker, talk_id, "talk deleted");
    Ok(StatusCode::OK)
}
