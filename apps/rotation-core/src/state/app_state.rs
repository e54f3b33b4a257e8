use sea_orm::DatabaseConnection;

use crate::config::votes::VoteSettings;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Pooled database connection
    pub db: DatabaseConnection,
    /// Vote defaults and retry budget
    pub votes: VoteSettings,
}

impl AppState {
    pub fn new(db: DatabaseConnection, votes: VoteSettings) -> Self {
        Self { db, votes }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}
