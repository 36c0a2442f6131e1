pub mod handlers;
pub mod http_error;
pub mod responses;

pub use http_error::{HttpError, HttpErrorBody};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Message returned for every 5xx raised by a handler; details only go to the logs.
pub const GENERIC_ERROR_MESSAGE: &str = "Hubo un error";

/// Body of errors raised by request handlers.
///
/// ```json
/// { "error": "Producto no encontrado" }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Handler-level error type.
///
/// Client errors keep their message; server errors are logged and collapsed
/// into [`GENERIC_ERROR_MESSAGE`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::NotFound(msg) => {
                tracing::info!(status = status.as_u16(), "Not found: {}", msg);
                msg
            }
            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database error while handling request");
                GENERIC_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
