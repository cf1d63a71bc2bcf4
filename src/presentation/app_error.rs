use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("request path id ({path_id}) and request body id ({body_id}) must match")]
    IdMismatch { path_id: String, body_id: String },

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Domain(DomainError::MissingField(field)) => (
                StatusCode::BAD_REQUEST,
                format!("Missing `{field}` in request body"),
            ),
            AppError::Domain(DomainError::Validation { field, message }) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid `{field}`: {message}"),
            ),
            AppError::Domain(DomainError::NotFound(resource)) => {
                (StatusCode::NOT_FOUND, format!("{resource} not found"))
            }
            AppError::Domain(DomainError::Store(cause)) => {
                // cause stays server-side; the client gets a generic 500
                error!(%cause, "store call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::IdMismatch { path_id, body_id } => (
                StatusCode::BAD_REQUEST,
                format!("Request path id ({path_id}) and request body id ({body_id}) must match"),
            ),
            AppError::Internal(err) => {
                error!(error = %err, "unhandled internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}
