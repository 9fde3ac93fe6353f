use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::activity_signup_service::{DirectoryError, ErrorKind};

/// Everything a handler can fail with, rendered as `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    Directory(DirectoryError),
    Query(QueryRejection),
}

impl From<DirectoryError> for ApiError {
    fn from(e: DirectoryError) -> Self {
        ApiError::Directory(e)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        ApiError::Query(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Directory(e) => {
                let status = match e.kind() {
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
                };
                (status, e.to_string())
            }
            // Always a client error for the query strings these routes take.
            ApiError::Query(e) => (StatusCode::BAD_REQUEST, e.body_text()),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
