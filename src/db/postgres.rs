//! PostgreSQL-backed room store

use super::queries::{
    COUNT_PARTICIPANT, COUNT_ROOM_PARTICIPANTS, DELETE_PARTICIPANT, GAME_MAX_PLAYER,
    INSERT_PARTICIPANT, LIST_ROOMS, ROOM_DETAIL, ROOM_GAME_ID,
};
use super::{RoomConnection, RoomStore};
use crate::error::AppError;
use crate::models::{Room, RoomDetailRow};
use async_trait::async_trait;
use deadpool_postgres::{Object, Pool};
use tracing::debug;

/// Room store handing out pooled Postgres connections
#[derive(Clone)]
pub struct PgRoomStore {
    pool: Pool,
}

impl PgRoomStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomStore for PgRoomStore {
    async fn acquire(&self) -> Result<Box<dyn RoomConnection>, AppError> {
        let client = self.pool.get().await?;
        Ok(Box::new(PgRoomConnection { client }))
    }
}

/// A checked-out connection; returned to the pool on drop
pub struct PgRoomConnection {
    client: Object,
}

#[async_trait]
impl RoomConnection for PgRoomConnection {
    async fn list_rooms(&self) -> Result<Vec<Room>, AppError> {
        let rows = self.client.query(LIST_ROOMS, &[]).await?;

        let rooms = rows
            .iter()
            .map(|row| {
                Ok(Room {
                    id: row.try_get("id")?,
                    room_name: row.try_get("room_name")?,
                })
            })
            .collect::<Result<Vec<_>, tokio_postgres::Error>>()?;

        debug!("Loaded {} rooms", rooms.len());
        Ok(rooms)
    }

    async fn room_detail_rows(&self, room_id: i32) -> Result<Vec<RoomDetailRow>, AppError> {
        let rows = self.client.query(ROOM_DETAIL, &[&room_id]).await?;

        let detail_rows = rows
            .iter()
            .map(|row| {
                Ok(RoomDetailRow {
                    room_id: row.try_get("id")?,
                    room_name: row.try_get("room_name")?,
                    participant_id: row.try_get("participant_id")?,
                    account_id: row.try_get("id_account")?,
                    username: row.try_get("username")?,
                })
            })
            .collect::<Result<Vec<_>, tokio_postgres::Error>>()?;

        Ok(detail_rows)
    }

    async fn room_game_id(&self, room_id: i32) -> Result<Option<i32>, AppError> {
        let row = self.client.query_opt(ROOM_GAME_ID, &[&room_id]).await?;
        Ok(row.map(|r| r.try_get("id_game")).transpose()?)
    }

    async fn game_max_player(&self, game_id: i32) -> Result<Option<i32>, AppError> {
        let row = self.client.query_opt(GAME_MAX_PLAYER, &[&game_id]).await?;
        Ok(row.map(|r| r.try_get("max_player")).transpose()?)
    }

    async fn count_room_participants(&self, room_id: i32) -> Result<i64, AppError> {
        let row = self.client.query_one(COUNT_ROOM_PARTICIPANTS, &[&room_id]).await?;
        Ok(row.try_get(0)?)
    }

    async fn insert_participant(&self, room_id: i32, account_id: i32) -> Result<(), AppError> {
        self.client
            .execute(INSERT_PARTICIPANT, &[&room_id, &account_id])
            .await?;
        Ok(())
    }

    async fn count_participant(&self, participant_id: i32) -> Result<i64, AppError> {
        let row = self.client.query_one(COUNT_PARTICIPANT, &[&participant_id]).await?;
        Ok(row.try_get(0)?)
    }

    async fn delete_participant(&self, participant_id: i32) -> Result<u64, AppError> {
        Ok(self.client.execute(DELETE_PARTICIPANT, &[&participant_id]).await?)
    }
}
