use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Contact not found")]
    NotFound,

    #[error("Contact id in the body does not match the id in the path")]
    IdMismatch,

    #[error("More than one contact matches the given fields")]
    Ambiguous,

    #[error("{0}")]
    Invalid(String),

    #[error("Contact was not created because the phone already exists!")]
    DuplicatePhone,

    #[error("Contact was not updated because another contact has this phone")]
    PhoneInUse,

    #[error("Contact {0} exists but was not updated")]
    Inconsistent(i32),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::IdMismatch
            | ApiError::Ambiguous
            | ApiError::Invalid(_)
            | ApiError::DuplicatePhone
            | ApiError::PhoneInUse => StatusCode::BAD_REQUEST,
            ApiError::Inconsistent(_) | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicatePhone => ApiError::DuplicatePhone,
            StoreError::Database(e) => ApiError::Database(e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Invalid(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Invalid(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            match &self {
                ApiError::Database(e) => tracing::error!(error = %e, "database failure"),
                other => tracing::error!(error = %other, "unexpected store state"),
            }
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
