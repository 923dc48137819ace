use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::StorageError;

/// Every failure a handler can surface, each with a fixed status and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    BadRequest,
    NotFound,
    Unprocessable,
    InternalError,
}

#[derive(Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: u16,
    message: &'static str,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ApiError::BadRequest => "Bad request",
            ApiError::NotFound => "Resource not found",
            ApiError::Unprocessable => "Unprocessable entity",
            ApiError::InternalError => "Internal server error",
        }
    }

    /// Collapses any storage failure, "not found" included, into a 422.
    pub fn unprocessable(error: StorageError) -> Self {
        tracing::warn!("Storage rejected the request: {error}");
        ApiError::Unprocessable
    }

    /// Collapses any storage failure, "not found" included, into a 500.
    pub fn internal(error: StorageError) -> Self {
        tracing::error!("Storage failure: {error:?}");
        ApiError::InternalError
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => ApiError::NotFound,
            other => ApiError::internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorEnvelope {
            success: false,
            error: status.as_u16(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}
