//! Error handling module
//!
//! Provides unified error types and handling for the entire application.

use crate::models::{DataEnvelope, MessageEnvelope};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Message sent to clients for backend failures
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// Backend failure reported to the client with an operation-specific message
    #[error("{message}: {source}")]
    Failed {
        message: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    /// Report this error to the client as `message` while keeping it as the logged cause
    pub fn failed(self, message: &'static str) -> Self {
        AppError::Failed {
            message,
            source: Box::new(self),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Internal(_)
            | AppError::Failed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message; backend detail is never included
    pub fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Failed { message, .. } => message.to_string(),
            AppError::Database(_) | AppError::Pool(_) | AppError::Internal(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }

    fn log(&self) {
        match self {
            AppError::Database(e) => error!("Database error: {:?}", e),
            AppError::Pool(e) => error!("Pool error: {:?}", e),
            AppError::Internal(msg) => error!("Internal error: {}", msg),
            AppError::Failed { message, source } => error!("{}: {}", message, source),
            AppError::BadRequest(msg) | AppError::NotFound(msg) => warn!("{}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        MessageEnvelope::new(self.status_code(), self.client_message()).into_response()
    }
}

/// Error rendered as `{ "status": .., "data": null }` instead of a message envelope
#[derive(Debug)]
pub struct NullDataError(pub AppError);

impl From<AppError> for NullDataError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for NullDataError {
    fn into_response(self) -> Response {
        self.0.log();
        DataEnvelope::new(self.0.status_code(), ()).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, AppError>;

/// Helper function to create a bad request error
pub fn bad_request(msg: impl Into<String>) -> AppError {
    AppError::BadRequest(msg.into())
}

/// Helper function to create a not found error
pub fn not_found_error(msg: impl Into<String>) -> AppError {
    AppError::NotFound(msg.into())
}
