//! Response shapes shared by the handlers.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Body of the camp listing: `{count, results}`.
#[derive(Serialize, ToSchema)]
pub struct Listing<T> {
    pub count: u64,
    pub results: Vec<T>,
}

impl<T> Listing<T> {
    pub fn new(results: Vec<T>) -> Self {
        Listing {
            count: results.len() as u64,
            results,
        }
    }
}

/// 201 with an optional `Location` header.
pub struct Created<T> {
    pub location: Option<String>,
    pub body: T,
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(self.body)).into_response();
        if let Some(value) = self.location.and_then(|l| HeaderValue::from_str(&l).ok()) {
            response.headers_mut().insert(header::LOCATION, value);
        }
        response
    }
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// 404 that still carries a (usually empty) result body.
pub fn not_found_with<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::NOT_FOUND, Json(data))
}
