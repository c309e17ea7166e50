//! SQL query constants
//!
//! Contains all SQL queries used by the application.

/// List every room
pub const LIST_ROOMS: &str = "SELECT id, room_name FROM rooms";

/// Room with its participants and their account usernames.
///
/// Participant and account columns are NULL for a room without participants.
pub const ROOM_DETAIL: &str = r#"
    SELECT
        rooms.id,
        rooms.room_name,
        participants.id AS participant_id,
        participants.id_account,
        accounts.username
    FROM rooms
        LEFT JOIN participants ON rooms.id = participants.id_room
        LEFT JOIN accounts ON participants.id_account = accounts.id
    WHERE rooms.id = $1
"#;

/// Game a room belongs to
pub const ROOM_GAME_ID: &str = "SELECT id_game FROM rooms WHERE id = $1";

/// Capacity of a game's rooms
pub const GAME_MAX_PLAYER: &str = "SELECT max_player FROM games WHERE id = $1";

/// Number of participants currently in a room
pub const COUNT_ROOM_PARTICIPANTS: &str = "SELECT COUNT(*) FROM participants WHERE id_room = $1";

pub const INSERT_PARTICIPANT: &str =
    "INSERT INTO participants (id_room, id_account) VALUES ($1, $2)";

/// 0 or 1 depending on whether the participant exists
pub const COUNT_PARTICIPANT: &str = "SELECT COUNT(*) FROM participants WHERE id = $1";

pub const DELETE_PARTICIPANT: &str = "DELETE FROM participants WHERE id = $1";

/// Lobby schema, created on startup when bootstrapping is enabled
pub const BOOTSTRAP_SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS accounts (
        id SERIAL PRIMARY KEY,
        username VARCHAR(255)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS games (
        id SERIAL PRIMARY KEY,
        max_player INTEGER NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS rooms (
        id SERIAL PRIMARY KEY,
        room_name VARCHAR(255) NOT NULL,
        id_game INTEGER NOT NULL REFERENCES games(id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS participants (
        id SERIAL PRIMARY KEY,
        id_room INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
        id_account INTEGER NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_participants_id_room ON participants(id_room)",
];
