//! Room and participant models and DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A room as listed by `GET /rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: i32,
    pub room_name: String,
}

/// Wrapper for the room listing payload
#[derive(Debug, Clone, Serialize)]
pub struct RoomList {
    pub rooms: Vec<Room>,
}

/// An account's membership in a room
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: i32,
    pub account_id: i32,
    /// Empty when the account join yields no username
    pub username: String,
}

/// A room with its participants, in database return order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomDetail {
    pub id: i32,
    pub room_name: String,
    pub participants: Vec<Participant>,
}

/// One row of the rooms -> participants -> accounts left join.
///
/// Participant columns are `None` when the room has no participants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetailRow {
    pub room_id: i32,
    pub room_name: String,
    pub participant_id: Option<i32>,
    pub account_id: Option<i32>,
    pub username: Option<String>,
}

impl RoomDetail {
    /// Fold join rows into a detail.
    ///
    /// Every row repeats the room columns, so the last row wins. No rows
    /// leaves the room fields zero-valued.
    pub fn from_rows(rows: impl IntoIterator<Item = RoomDetailRow>) -> Self {
        let mut detail = RoomDetail::default();

        for row in rows {
            detail.id = row.room_id;
            detail.room_name = row.room_name;

            if let Some(participant_id) = row.participant_id {
                detail.participants.push(Participant {
                    id: participant_id,
                    account_id: row.account_id.unwrap_or_default(),
                    username: row.username.unwrap_or_default(),
                });
            }
        }

        detail
    }
}

/// Request body for joining a room.
///
/// Missing fields decode as zero.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct JoinRoomRequest {
    pub account_id: i32,
    pub room_id: i32,
}

#[derive(Error, Debug)]
pub enum JoinBodyError {
    #[error("empty body")]
    Empty,

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl JoinRoomRequest {
    /// Decode the first JSON value of a request body.
    ///
    /// Only an object or `null` (all fields zero) is accepted. Bytes after the
    /// first value are ignored.
    pub fn from_body(body: &[u8]) -> Result<Self, JoinBodyError> {
        let value = serde_json::Deserializer::from_slice(body)
            .into_iter::<Value>()
            .next()
            .ok_or(JoinBodyError::Empty)??;

        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            Value::Array(_) => Err(JoinBodyError::NotAnObject("an array")),
            Value::Bool(_) => Err(JoinBodyError::NotAnObject("a boolean")),
            Value::Number(_) => Err(JoinBodyError::NotAnObject("a number")),
            Value::String(_) => Err(JoinBodyError::NotAnObject("a string")),
        }
    }
}
