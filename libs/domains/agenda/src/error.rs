use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorDetail};
use database::mongodb::MongoError;
use thiserror::Error;

use crate::validation::FieldError;

#[derive(Debug, Error)]
pub enum AgendaError {
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Invalid identifier '{value}': {message}")]
    InvalidIdentifier { value: String, message: String },

    #[error("Database error: {0}")]
    Database(String),
}

pub type AgendaResult<T> = Result<T, AgendaError>;

impl From<FieldError> for ErrorDetail {
    fn from(err: FieldError) -> Self {
        ErrorDetail::new(err.value, err.msg, err.param)
    }
}

/// Convert AgendaError to AppError for standardized error responses
impl From<AgendaError> for AppError {
    fn from(err: AgendaError) -> Self {
        match err {
            AgendaError::Validation(errors) => {
                AppError::Validation(errors.into_iter().map(ErrorDetail::from).collect())
            }
            AgendaError::InvalidIdentifier { value, message } => AppError::InvalidIdentifier(
                ErrorDetail::new(value, format!("Identificador inválido: {}", message), "id"),
            ),
            AgendaError::Database(message) => AppError::Database(ErrorDetail::new(
                message,
                "Erro ao acessar a agenda de eventos",
                "database",
            )),
        }
    }
}

impl IntoResponse for AgendaError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for AgendaError {
    fn from(err: mongodb::error::Error) -> Self {
        AgendaError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AgendaError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AgendaError::Database(err.to_string())
    }
}

impl From<MongoError> for AgendaError {
    fn from(err: MongoError) -> Self {
        AgendaError::Database(err.to_string())
    }
}
