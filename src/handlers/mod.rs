//! HTTP handlers for camps, talks, and operations.

pub mod camps;
pub mod operations;
pub mod talks;

use crate::error::AppError;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    Json,
};

/// Unwrap a JSON body, turning any rejection (bad syntax, wrong content type, wrong shape) into a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(t)| t)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Unwrap query parameters; a query string that does not deserialize is a 400.
pub(crate) fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    params
        .map(|Query(t)| t)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}
