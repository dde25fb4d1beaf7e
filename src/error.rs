//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
}

/// Failures raised by a [`crate::repository::CampRepository`] implementation.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Fixed client-facing messages for unexpected failures, one per operation family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Failure {
    Database,
    CreateResource,
    UpdateResource,
    RetrieveResource,
    ReloadConfig,
}

impl Failure {
    pub fn message(self) -> &'static str {
        match self {
            Failure::Database => "Database Failure",
            Failure::CreateResource => "Failed to create resource",
            Failure::UpdateResource => "Failed to update resource",
            Failure::RetrieveResource => "Failed to retrieve resource.",
            Failure::ReloadConfig => "Something real bad happened.",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    /// The store accepted the call but reported that nothing was written.
    #[error("{0}")]
    SaveFailed(String),
    #[error("unsupported api version: {0}")]
    UnsupportedApiVersion(String),
    #[error("{}", .failure.message())]
    Internal {
        failure: Failure,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl AppError {
    pub fn save_failed() -> Self {
        AppError::SaveFailed("Bad Request".into())
    }
}

/// Tags an error from the store (or settings source) with the fixed message
/// the client will see in place of the underlying cause.
pub trait OrInternal<T> {
    fn or_internal(self, failure: Failure) -> Result<T, AppError>;
}

impl<T, E> OrInternal<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn or_internal(self, failure: Failure) -> Result<T, AppError> {
        self.map_err(|e| AppError::Internal {
            failure,
            source: Box::new(e),
        })
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

impl ErrorBody {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::SaveFailed(_) => (StatusCode::BAD_REQUEST, "save_failed"),
            AppError::UnsupportedApiVersion(_) => (StatusCode::BAD_REQUEST, "unsupported_api_version"),
            AppError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        match &self {
            AppError::Internal { failure, source } => {
                tracing::error!(error = %source, failure = failure.message(), "request failed");
            }
            _ => tracing::debug!(status = status.as_u16(), message = %self, "request rejected"),
        }
        (status, Json(ErrorBody::new(code, self.to_string()))).into_response()
    }
}
