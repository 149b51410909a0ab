use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use leftright_protocol::{ErrorResponse, RatioError};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid ratio value: {message}")]
    InvalidRatio { message: String, received: Value },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidRatio { .. } | AppError::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<RatioError> for AppError {
    fn from(e: RatioError) -> Self {
        match e {
            RatioError::InvalidLayout(_) => AppError::Validation(e.to_string()),
            other => AppError::InvalidRatio {
                message: other.to_string(),
                received: Value::Null,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Database(e) => {
                tracing::error!("Database Error: {}", e);
                ErrorResponse {
                    error: "Storage unavailable".to_string(),
                    message: None,
                    received_ratio: None,
                }
            }
            AppError::InvalidRatio { message, received } => ErrorResponse {
                error: "Invalid ratio value".to_string(),
                message: Some(message),
                received_ratio: Some(received),
            },
            AppError::Validation(s) => ErrorResponse {
                error: s,
                message: None,
                received_ratio: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
