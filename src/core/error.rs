use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::features::categories::CategoryError;
use crate::shared::types::{ApiResponse, Meta};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Conflict caused by rows that still reference the target; `count` is
    /// returned to the client as `meta.total`
    #[error("In use: {message}")]
    InUse { message: String, count: i64 },
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::Validation(msg) => AppError::Validation(msg),
            CategoryError::NotFound(slug) => {
                AppError::NotFound(format!("Category '{}' not found", slug))
            }
            CategoryError::InUse { count, .. } => AppError::InUse {
                message: err.to_string(),
                count,
            },
            e @ (CategoryError::DuplicateSlug(_) | CategoryError::ImmutableField { .. }) => {
                AppError::Conflict(e.to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut meta = None;
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Backend unavailable, please retry".to_string(),
                    None,
                )
            }
            AppError::BackendUnavailable(ref msg) => {
                tracing::error!("Backend unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Backend unavailable, please retry".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::InUse { ref message, count } => {
                meta = Some(Meta { total: count });
                (StatusCode::CONFLICT, message.clone(), None)
            }
        };

        let mut response = ApiResponse::<()>::error(Some(message), errors);
        response.meta = meta;
        let body = Json(response);

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_in_use_maps_to_conflict_with_count() {
        let err: AppError = CategoryError::InUse {
            slug: "plain".to_string(),
            count: 5,
        }
        .into();

        match err {
            AppError::InUse { ref message, count } => {
                assert!(message.contains("5 product(s)"));
                assert_eq!(count, 5);
            }
            ref other => panic!("expected in-use conflict, got {:?}", other),
        }
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (
                AppError::BackendUnavailable("x".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
