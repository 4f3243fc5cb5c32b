//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use folksonomy_types::error::{SkillError, TagError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Tag and skill errors.
    Tag(TagError),
    /// Category, user and user-skill errors.
    Skill(SkillError),
    Validation(String),
    Internal(String),
}

impl From<TagError> for AppError {
    fn from(e: TagError) -> Self {
        AppError::Tag(e)
    }
}

impl From<SkillError> for AppError {
    fn from(e: SkillError) -> Self {
        AppError::Skill(e)
    }
}

impl AppError {
    /// Status, code and optional details for the envelope.
    fn parts(&self) -> (StatusCode, &'static str, Option<serde_json::Value>) {
        match self {
            AppError::Tag(TagError::NotFound) => (StatusCode::NOT_FOUND, "NOT_FOUND", None),
            AppError::Tag(TagError::NameConflict(_)) => {
                (StatusCode::CONFLICT, "NAME_CONFLICT", None)
            }
            AppError::Tag(TagError::InvalidName(_) | TagError::InvalidParent(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", None)
            }
            AppError::Tag(TagError::Protected(_)) => (StatusCode::CONFLICT, "PROTECTED", None),
            AppError::Tag(TagError::BulkActionAborted { completed, reason }) => (
                StatusCode::CONFLICT,
                "BULK_ACTION_ABORTED",
                Some(json!({ "completed": completed, "reason": reason })),
            ),
            AppError::Tag(TagError::StorageError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", None)
            }
            AppError::Skill(SkillError::CategoryNotFound) => {
                (StatusCode::NOT_FOUND, "CATEGORY_NOT_FOUND", None)
            }
            AppError::Skill(SkillError::UserNotFound) => {
                (StatusCode::NOT_FOUND, "USER_NOT_FOUND", None)
            }
            AppError::Skill(SkillError::SkillNotFound) => {
                (StatusCode::NOT_FOUND, "SKILL_NOT_FOUND", None)
            }
            AppError::Skill(SkillError::UserSkillNotFound) => {
                (StatusCode::NOT_FOUND, "USER_SKILL_NOT_FOUND", None)
            }
            AppError::Skill(SkillError::NameConflict(_)) => {
                (StatusCode::CONFLICT, "NAME_CONFLICT", None)
            }
            AppError::Skill(SkillError::InvalidName(_) | SkillError::InvalidLevel(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", None)
            }
            AppError::Skill(SkillError::StorageError(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", None)
            }
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", None),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", None),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Tag(e) => e.to_string(),
            AppError::Skill(e) => e.to_string(),
            AppError::Validation(msg) | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, details) = self.parts();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(code, error = %message, "request failed");
        }

        let body = ApiResponse::error(
            code,
            &message,
            details,
            uuid::Uuid::now_v7().to_string(),
            0,
        );
        (status, Json(body)).into_response()
    }
}
