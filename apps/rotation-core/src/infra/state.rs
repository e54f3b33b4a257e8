use crate::config::db::DbConfig;
use crate::config::votes::VoteSettings;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used by tests and embedding processes)
pub struct StateBuilder {
    votes: VoteSettings,
    db_config: Option<DbConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            votes: VoteSettings::default(),
            db_config: None,
        }
    }

    pub fn with_db(mut self, config: DbConfig) -> Self {
        self.db_config = Some(config);
        self
    }

    pub fn with_votes(mut self, votes: VoteSettings) -> Self {
        self.votes = votes;
        self
    }

    /// Connect, migrate, and assemble the state.
    pub async fn build(self) -> Result<AppState, AppError> {
        self.votes.validate()?;
        let config = match self.db_config {
            Some(config) => config,
            None => DbConfig::from_env_kind()?,
        };
        // single entrypoint: build + migrate
        let conn = bootstrap_db(&config).await?;
        Ok(AppState::new(conn, self.votes))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
