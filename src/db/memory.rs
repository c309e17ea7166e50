//! In-memory room store for handler tests
//!
//! Mirrors the Postgres tables with `BTreeMap`s so join rows come back in id
//! order. Individual operations can be told to fail.

use super::{RoomConnection, RoomStore};
use crate::error::AppError;
use crate::models::{Room, RoomDetailRow};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Store operations that can be forced to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Acquire,
    ListRooms,
    RoomDetail,
    RoomGame,
    GameCapacity,
    CountRoomParticipants,
    InsertParticipant,
    CountParticipant,
    DeleteParticipant,
}

#[derive(Debug, Clone, Copy)]
struct ParticipantRecord {
    room_id: i32,
    account_id: i32,
}

#[derive(Debug, Default)]
struct Tables {
    rooms: BTreeMap<i32, (String, i32)>,
    games: BTreeMap<i32, i32>,
    accounts: BTreeMap<i32, Option<String>>,
    participants: BTreeMap<i32, ParticipantRecord>,
    next_participant_id: i32,
    failing: HashSet<StoreOp>,
}

impl Tables {
    fn check(&self, op: StoreOp) -> Result<(), AppError> {
        if self.failing.contains(&op) {
            return Err(AppError::Internal(format!("injected failure: {:?}", op)));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryRoomStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryRoomStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_game(&self, id: i32, max_player: i32) {
        self.tables.lock().await.games.insert(id, max_player);
    }

    pub async fn add_room(&self, id: i32, room_name: &str, game_id: i32) {
        self.tables
            .lock()
            .await
            .rooms
            .insert(id, (room_name.to_string(), game_id));
    }

    pub async fn add_account(&self, id: i32, username: Option<&str>) {
        self.tables
            .lock()
            .await
            .accounts
            .insert(id, username.map(String::from));
    }

    /// Seed a participant directly, returning its id
    pub async fn add_participant(&self, room_id: i32, account_id: i32) -> i32 {
        let mut tables = self.tables.lock().await;
        insert(&mut tables, room_id, account_id)
    }

    pub async fn fail(&self, op: StoreOp) {
        self.tables.lock().await.failing.insert(op);
    }

    pub async fn participant_count(&self, room_id: i32) -> usize {
        self.tables
            .lock()
            .await
            .participants
            .values()
            .filter(|p| p.room_id == room_id)
            .count()
    }

    pub async fn has_participant(&self, participant_id: i32) -> bool {
        self.tables
            .lock()
            .await
            .participants
            .contains_key(&participant_id)
    }
}

fn insert(tables: &mut Tables, room_id: i32, account_id: i32) -> i32 {
    tables.next_participant_id += 1;
    let id = tables.next_participant_id;
    tables.participants.insert(id, ParticipantRecord { room_id, account_id });
    id
}

#[async_trait]
impl RoomStore for MemoryRoomStore {
    async fn acquire(&self) -> Result<Box<dyn RoomConnection>, AppError> {
        self.tables.lock().await.check(StoreOp::Acquire)?;
        Ok(Box::new(self.clone()))
    }
}

#[async_trait]
impl RoomConnection for MemoryRoomStore {
    async fn list_rooms(&self) -> Result<Vec<Room>, AppError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::ListRooms)?;

        Ok(tables
            .rooms
            .iter()
            .map(|(id, (room_name, _))| Room {
                id: *id,
                room_name: room_name.clone(),
            })
            .collect())
    }

    async fn room_detail_rows(&self, room_id: i32) -> Result<Vec<RoomDetailRow>, AppError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::RoomDetail)?;

        let Some((room_name, _)) = tables.rooms.get(&room_id) else {
            return Ok(Vec::new());
        };

        let rows: Vec<RoomDetailRow> = tables
            .participants
            .iter()
            .filter(|(_, p)| p.room_id == room_id)
            .map(|(id, p)| RoomDetailRow {
                room_id,
                room_name: room_name.clone(),
                participant_id: Some(*id),
                account_id: Some(p.account_id),
                username: tables.accounts.get(&p.account_id).cloned().flatten(),
            })
            .collect();

        // A left join still yields the room row when nothing matches
        if rows.is_empty() {
            return Ok(vec![RoomDetailRow {
                room_id,
                room_name: room_name.clone(),
                participant_id: None,
                account_id: None,
                username: None,
            }]);
        }

        Ok(rows)
    }

    async fn room_game_id(&self, room_id: i32) -> Result<Option<i32>, AppError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::RoomGame)?;
        Ok(tables.rooms.get(&room_id).map(|(_, game_id)| *game_id))
    }

    async fn game_max_player(&self, game_id: i32) -> Result<Option<i32>, AppError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::GameCapacity)?;
        Ok(tables.games.get(&game_id).copied())
    }

    async fn count_room_participants(&self, room_id: i32) -> Result<i64, AppError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::CountRoomParticipants)?;
        Ok(tables
            .participants
            .values()
            .filter(|p| p.room_id == room_id)
            .count() as i64)
    }

    async fn insert_participant(&self, room_id: i32, account_id: i32) -> Result<(), AppError> {
        let mut tables = self.tables.lock().await;
        tables.check(StoreOp::InsertParticipant)?;
        insert(&mut tables, room_id, account_id);
        Ok(())
    }

    async fn count_participant(&self, participant_id: i32) -> Result<i64, AppError> {
        let tables = self.tables.lock().await;
        tables.check(StoreOp::CountParticipant)?;
        Ok(i64::from(tables.participants.contains_key(&participant_id)))
    }

    async fn delete_participant(&self, participant_id: i32) -> Result<u64, AppError> {
        let mut tables = self.tables.lock().await;
        tables.check(StoreOp::DeleteParticipant)?;
        Ok(u64::from(tables.participants.remove(&participant_id).is_some()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_left_join_rows_for_empty_and_missing_rooms() {
        let store = MemoryRoomStore::new();
        store.add_game(1, 4).await;
        store.add_room(5, "Empty", 1).await;

        let rows = assert_ok!(store.room_detail_rows(5).await);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].participant_id, None);

        let rows = assert_ok!(store.room_detail_rows(6).await);
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_injected_failure_only_hits_its_operation() {
        let store = MemoryRoomStore::new();
        store.add_room(5, "Lobby", 1).await;
        store.fail(StoreOp::DeleteParticipant).await;

        let id = store.add_participant(5, 9).await;
        assert_err!(store.delete_participant(id).await);
        assert_eq!(assert_ok!(store.count_participant(id).await), 1);
        assert_eq!(assert_ok!(store.count_room_participants(5).await), 1);
    }
}
