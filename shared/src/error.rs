use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error as StdError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ResourceConflict(String),
    #[error("validation failed")]
    ValidationError(#[from] garde::Report),
    #[error("failed to convert a stored value")]
    ConversionEntityError(String),
    #[error("database query failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("{0}")]
    NoRowsAffectedError(String),
    #[error("failed to run a database transaction")]
    TransactionError(#[source] sqlx::Error),
    #[error("key-value store operation failed")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("password hashing failed")]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error("authentication failed")]
    UnauthenticatedError,
    #[error("login required")]
    UnauthorizedError,
    #[error("admin role required")]
    ForbiddenOperation,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ResourceConflict(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConversionEntityError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::TransactionError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
        }
    }

    // エラー応答の診断用フィールドに入れる文字列
    fn detail(&self) -> Option<String> {
        match self {
            AppError::ValidationError(report) => Some(report.to_string()),
            AppError::ConversionEntityError(detail) => Some(detail.clone()),
            _ => self.source().map(|cause| cause.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
        }
        let body = Json(json!({
            "success": false,
            "msg": self.to_string(),
            "error": self.detail(),
        }));
        (status_code, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(
            AppError::EntityNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ResourceConflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::UnprocessableEntity("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::UnauthenticatedError.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::ForbiddenOperation.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NoRowsAffectedError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_response_carries_the_envelope() {
        let res = AppError::EntityNotFound("Room not found".into()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
