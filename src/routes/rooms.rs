//! Room and participant route handlers
//!
//! Every handler acquires its own store connection and runs its queries one
//! after another. None of the multi-step flows are wrapped in a transaction.

use crate::error::{bad_request, not_found_error, ApiResult, AppError, NullDataError};
use crate::models::{DataEnvelope, JoinRoomRequest, MessageEnvelope, RoomDetail, RoomList};
use crate::state::SharedState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{debug, info, warn};

/// List all rooms
pub async fn list_rooms(State(state): State<SharedState>) -> ApiResult<DataEnvelope<RoomList>> {
    let conn = state.store.acquire().await?;
    let rooms = conn.list_rooms().await?;

    debug!("Found {} rooms", rooms.len());

    Ok(DataEnvelope::ok(RoomList { rooms }))
}

/// Get a room with its participants.
///
/// A room that does not exist, including a non-integer id, comes back with
/// zero-valued fields rather than a 404.
pub async fn get_room_detail(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<DataEnvelope<RoomDetail>, NullDataError> {
    let conn = state.store.acquire().await?;

    let rows = match parse_id(&id) {
        Some(room_id) => conn.room_detail_rows(room_id).await?,
        None => Vec::new(),
    };
    let detail = RoomDetail::from_rows(rows);

    debug!(
        "Room {} has {} participants",
        id,
        detail.participants.len()
    );

    Ok(DataEnvelope::ok(detail))
}

/// Join a room.
///
/// The target room comes from the body's `room_id`; the path id is not used.
/// The capacity check and the insert are separate statements, so concurrent
/// joins can overfill a room.
pub async fn join_room(State(state): State<SharedState>, body: Bytes) -> ApiResult<MessageEnvelope> {
    let request = JoinRoomRequest::from_body(&body).map_err(|e| {
        debug!("Rejecting join request body: {}", e);
        bad_request("Invalid request body")
    })?;

    let conn = state.store.acquire().await?;

    // A failed lookup is reported the same way as a missing room
    let game_id = match conn.room_game_id(request.room_id).await {
        Ok(Some(game_id)) => game_id,
        Ok(None) => return Err(not_found_error("Room not found")),
        Err(e) => {
            warn!("Room lookup for room {} failed: {}", request.room_id, e);
            return Err(not_found_error("Room not found"));
        }
    };

    let max_player = conn.game_max_player(game_id).await?.ok_or_else(|| {
        AppError::Internal(format!(
            "Game {} of room {} does not exist",
            game_id, request.room_id
        ))
    })?;

    let current = conn.count_room_participants(request.room_id).await?;
    if current >= i64::from(max_player) {
        return Err(bad_request("Room is full"));
    }

    conn.insert_participant(request.room_id, request.account_id)
        .await
        .map_err(|e| e.failed("Failed to insert into room"))?;

    info!(
        "Account {} joined room {} ({}/{})",
        request.account_id,
        request.room_id,
        current + 1,
        max_player
    );

    Ok(MessageEnvelope::new(
        StatusCode::CREATED,
        "Successfully inserted into room",
    ))
}

/// Leave a room by participant id
pub async fn leave_room(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<MessageEnvelope> {
    let conn = state.store.acquire().await?;

    // A non-integer id matches no participant
    let participant_id = match parse_id(&id) {
        Some(participant_id) => participant_id,
        None => return Err(not_found_error("Participant not found")),
    };

    if conn.count_participant(participant_id).await? == 0 {
        return Err(not_found_error("Participant not found"));
    }

    // Deleting a row removed since the check still succeeds
    conn.delete_participant(participant_id)
        .await
        .map_err(|e| e.failed("Failed to leave room"))?;

    info!("Participant {} left their room", participant_id);

    Ok(MessageEnvelope::new(StatusCode::OK, "Successfully left room"))
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}
