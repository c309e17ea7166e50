//! Database connection management
//!
//! Handles connection pooling and the room store seam used by the handlers.

#[cfg(test)]
pub mod memory;
pub mod postgres;
pub mod queries;

use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::models::{Room, RoomDetailRow};
use async_trait::async_trait;
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use tokio_postgres::NoTls;
use tracing::info;

pub use postgres::PgRoomStore;

/// Source of per-request store connections.
///
/// A handler acquires one connection when it starts and drops it when it
/// returns, on every exit path.
#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn RoomConnection>, AppError>;
}

/// Queries a handler can run over its connection, one at a time.
///
/// Nothing here is transactional: each call is its own statement.
#[async_trait]
pub trait RoomConnection: Send + Sync {
    async fn list_rooms(&self) -> Result<Vec<Room>, AppError>;

    /// Rows of the rooms -> participants -> accounts left join for one room
    async fn room_detail_rows(&self, room_id: i32) -> Result<Vec<RoomDetailRow>, AppError>;

    /// Game id of a room, `None` when the room does not exist
    async fn room_game_id(&self, room_id: i32) -> Result<Option<i32>, AppError>;

    /// Capacity of a game, `None` when the game does not exist
    async fn game_max_player(&self, game_id: i32) -> Result<Option<i32>, AppError>;

    async fn count_room_participants(&self, room_id: i32) -> Result<i64, AppError>;

    async fn insert_participant(&self, room_id: i32, account_id: i32) -> Result<(), AppError>;

    async fn count_participant(&self, participant_id: i32) -> Result<i64, AppError>;

    /// Returns the number of rows removed; removing an absent row is not an error
    async fn delete_participant(&self, participant_id: i32) -> Result<u64, AppError>;
}

/// Create a connection pool with given configuration
pub fn create_pool(config: &DatabaseConfig) -> Result<Pool, AppError> {
    let mut cfg = Config::new();
    cfg.host = Some(config.host.clone());
    cfg.port = Some(config.port);
    cfg.user = Some(config.user.clone());
    cfg.password = Some(config.password.clone());
    cfg.dbname = Some(config.database.clone());
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });
    cfg.pool = Some(PoolConfig::new(config.max_pool_size));

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .map_err(|e| AppError::Internal(format!("Failed to create pool: {}", e)))
}

/// Check that the pool can reach the database
pub async fn verify_connection(pool: &Pool) -> Result<(), AppError> {
    let client = pool.get().await?;
    client.query_one("SELECT 1", &[]).await?;
    info!("Database connection verified");
    Ok(())
}

/// Create the lobby tables if they don't exist
pub async fn bootstrap_schema(pool: &Pool) -> Result<(), AppError> {
    let client = pool.get().await?;

    for statement in queries::BOOTSTRAP_SCHEMA {
        client.execute(*statement, &[]).await?;
    }

    info!("Lobby schema initialized");
    Ok(())
}
