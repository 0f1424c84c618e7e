use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::position_lock::PositionLocks;

/// Application context handed to every handler through axum `State`.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub positions: Arc<PositionLocks>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, positions: Arc::new(PositionLocks::new()) }
    }
}
