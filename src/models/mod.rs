//! Data models and DTOs (Data Transfer Objects)
//!
//! Contains all request/response structures used by the API.

pub mod room;

// Re-export commonly used types
pub use room::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};

/// Envelope carrying a payload: `{ "status": .., "data": .. }`
///
/// The `status` field is always the HTTP status the envelope is written with.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T: Serialize> {
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    pub data: T,
}

impl<T: Serialize> DataEnvelope<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self { status, data }
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }
}

impl<T: Serialize> IntoResponse for DataEnvelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// Envelope carrying a message: `{ "status": .., "message": .. }`
#[derive(Debug, Serialize)]
pub struct MessageEnvelope {
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    pub message: String,
}

impl MessageEnvelope {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for MessageEnvelope {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

fn serialize_status<S: Serializer>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u16(status.as_u16())
}
