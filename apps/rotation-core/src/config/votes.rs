use std::time::Duration;

use super::db::parse_var;
use crate::error::AppError;

/// Vote and retry settings read once at startup.
///
/// Per-queue thresholds live in the database; `default_vote_threshold`
/// applies only where no queue supplies one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteSettings {
    pub default_vote_threshold: u32,
    /// Delay between a passed vote and its waitlist marker firing
    pub re_add_delay: Duration,
    /// Total attempts (first try included) for a conflicting transaction
    pub max_txn_attempts: u32,
}

impl Default for VoteSettings {
    fn default() -> Self {
        Self {
            default_vote_threshold: 7,
            re_add_delay: Duration::from_secs(30),
            max_txn_attempts: 5,
        }
    }
}

impl VoteSettings {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let settings = Self {
            default_vote_threshold: parse_var(
                "ROTATION_DEFAULT_VOTE_THRESHOLD",
                defaults.default_vote_threshold,
            )?,
            re_add_delay: Duration::from_secs(parse_var(
                "ROTATION_RE_ADD_DELAY_SECS",
                defaults.re_add_delay.as_secs(),
            )?),
            max_txn_attempts: parse_var("ROTATION_MAX_TXN_ATTEMPTS", defaults.max_txn_attempts)?,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.default_vote_threshold < 1 {
            return Err(AppError::config_msg(
                "ROTATION_DEFAULT_VOTE_THRESHOLD must be at least 1",
            ));
        }
        if self.max_txn_attempts < 1 {
            return Err(AppError::config_msg(
                "ROTATION_MAX_TXN_ATTEMPTS must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn with_default_threshold(mut self, threshold: u32) -> Self {
        self.default_vote_threshold = threshold;
        self
    }

    pub fn with_max_txn_attempts(mut self, attempts: u32) -> Self {
        self.max_txn_attempts = attempts;
        self
    }
}
