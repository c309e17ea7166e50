//! Application state management
//!
//! Contains shared state accessible across all handlers. The database is the
//! only source of truth; nothing is cached in-process.

use crate::db::RoomStore;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState {
    /// Room store handing out one connection per request
    pub store: Arc<dyn RoomStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RoomStore>) -> Self {
        Self { store }
    }
}

/// Type alias for shared state
pub type SharedState = Arc<AppState>;
