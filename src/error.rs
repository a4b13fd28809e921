use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication credentials were not provided or are invalid.")]
    Unauthorized,

    #[error(transparent)]
    Domain(#[from] plateful_shared::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Domain(plateful_shared::Error::Validate(errors)) => {
                (StatusCode::BAD_REQUEST, errors.to_string())
            }
            AppError::Domain(plateful_shared::Error::Invalid(detail)) => {
                (StatusCode::BAD_REQUEST, detail)
            }
            AppError::Domain(plateful_shared::Error::NotFound(detail)) => {
                (StatusCode::NOT_FOUND, detail)
            }
            AppError::Domain(plateful_shared::Error::Forbidden) => (
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action.".to_string(),
            ),
            AppError::Domain(plateful_shared::Error::Server(detail)) => {
                tracing::error!("Server error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::Domain(plateful_shared::Error::Unknown(e)) => {
                tracing::error!("Unexpected error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred. Please try again later.".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
