pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// One entry of an error envelope.
///
/// `value` echoes what the client sent (or the offending path/driver message),
/// `msg` is human readable and `param` names the field or location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(value_type = Object)]
    pub value: serde_json::Value,
    pub msg: String,
    pub param: String,
}

impl ErrorDetail {
    pub fn new(
        value: impl Into<serde_json::Value>,
        msg: impl Into<String>,
        param: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            msg: msg.into(),
            param: param.into(),
        }
    }
}

/// Error body returned by every failing endpoint.
///
/// ```json
/// {
///   "errors": [
///     { "value": "12ab", "msg": "O número de registro deve conter apenas números", "param": "n_registro" }
///   ]
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub errors: Vec<ErrorDetail>,
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Form extraction error: {0}")]
    FormExtractorRejection(#[from] FormRejection),

    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<ErrorDetail>),

    #[error("Invalid identifier: {}", .0.msg)]
    InvalidIdentifier(ErrorDetail),

    #[error("Not Found: {}", .0.msg)]
    NotFound(ErrorDetail),

    #[error("Database error: {}", .0.msg)]
    Database(ErrorDetail),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_)
            | AppError::FormExtractorRejection(_)
            | AppError::Validation(_)
            | AppError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let errors = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                vec![ErrorDetail::new(
                    e.body_text(),
                    "O corpo da requisição não é um JSON válido",
                    "body",
                )]
            }
            AppError::FormExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::FormExtraction.code(),
                    "Form extraction error: {:?}",
                    e
                );
                vec![ErrorDetail::new(
                    e.body_text(),
                    "O corpo da requisição não é um formulário válido",
                    "body",
                )]
            }
            AppError::Validation(errors) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    count = errors.len(),
                    "Validation error: {:?}",
                    errors
                );
                errors
            }
            AppError::InvalidIdentifier(detail) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidObjectId.code(),
                    "Invalid identifier: {:?}",
                    detail.value
                );
                vec![detail]
            }
            AppError::NotFound(detail) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    detail.value
                );
                vec![detail]
            }
            AppError::Database(detail) => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {}",
                    detail.value
                );
                vec![detail]
            }
        };

        (status, Json(ErrorResponse { errors })).into_response()
    }
}
