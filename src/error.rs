/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - validation 失敗は 422 + field → messages の map で返す (部分受理なし)
 * - RepoError / IdCodecError を統一的に変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::services::id_codec::IdCodecError;
use crate::services::validation::FieldErrors;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("conflict: {message}")]
    Conflict { message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, errors) = match self {
            AppError::BadRequest { code, message } => {
                (StatusCode::BAD_REQUEST, code, message, None)
            }
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_FAILED",
                "The given data was invalid.".into(),
                Some(errors),
            ),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("{resource} not found."),
                None,
            ),
            AppError::Conflict { message } => (StatusCode::CONFLICT, "CONFLICT", message, None),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
                None,
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::Conflict {
                message: "resource already exists".into(),
            },
            RepoError::Db(e) => {
                tracing::error!(error = %e, "repo query failed");
                AppError::Internal
            }
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        // encode 失敗はサーバ側の設定/プログラミングエラー
        tracing::error!(error = %e, "public id encode failed");
        AppError::Internal
    }
}
