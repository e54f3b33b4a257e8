use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

/// Storage backend kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(DbKind::Postgres),
            "sqlite-file" | "sqlite_file" | "sqlite" => Ok(DbKind::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(DbKind::SqliteMemory),
            other => Err(AppError::config_msg(format!(
                "Unknown database kind '{other}' (expected postgres | sqlite-file | sqlite-memory)"
            ))),
        }
    }
}

/// Everything needed to open a pool for one backend.
#[derive(Debug, Clone, PartialEq)]
pub struct DbConfig {
    pub kind: DbKind,
    /// Postgres URL, SQLite file path, or `sqlite::memory:`
    pub url: String,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
    pub sqlite_busy_timeout_ms: u64,
    pub pg_statement_timeout: String,
    pub app_name: String,
}

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

impl DbConfig {
    /// Build the config for `kind` from environment variables.
    pub fn from_env(kind: DbKind) -> Result<Self, AppError> {
        let url = match kind {
            DbKind::Postgres => postgres_url()?,
            DbKind::SqliteFile => {
                let path = must_var("ROTATION_SQLITE_PATH")?;
                sqlite_file_url(&PathBuf::from(path))
            }
            DbKind::SqliteMemory => "sqlite::memory:".to_string(),
        };

        let mut config = Self::base(kind, url);
        config.sqlite_busy_timeout_ms =
            parse_var("ROTATION_SQLITE_BUSY_TIMEOUT_MS", DEFAULT_BUSY_TIMEOUT_MS)?;
        config.pool_max = parse_var("ROTATION_DB_POOL_MAX", config.pool_max)?;
        if let Ok(timeout) = env::var("ROTATION_PG_STATEMENT_TIMEOUT") {
            config.pg_statement_timeout = timeout;
        }
        Ok(config)
    }

    /// Kind from `ROTATION_DB_KIND` (defaults to postgres), then `from_env`.
    pub fn from_env_kind() -> Result<Self, AppError> {
        let kind = match env::var("ROTATION_DB_KIND") {
            Ok(raw) => DbKind::from_str(&raw)?,
            Err(_) => DbKind::Postgres,
        };
        Self::from_env(kind)
    }

    /// SQLite file database at `path`, created on first connect.
    pub fn sqlite_file(path: impl Into<PathBuf>) -> Self {
        Self::base(DbKind::SqliteFile, sqlite_file_url(&path.into()))
    }

    pub fn sqlite_memory() -> Self {
        let mut config = Self::base(DbKind::SqliteMemory, "sqlite::memory:".to_string());
        // every connection to :memory: is its own database
        config.pool_max = 1;
        config
    }

    pub fn postgres(url: impl Into<String>) -> Self {
        Self::base(DbKind::Postgres, url.into())
    }

    fn base(kind: DbKind, url: String) -> Self {
        Self {
            kind,
            url,
            pool_max: match kind {
                DbKind::SqliteMemory => 1,
                _ => 8,
            },
            acquire_timeout_ms: 5_000,
            sqlite_busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            pg_statement_timeout: "15s".to_string(),
            app_name: "rotation-core".to_string(),
        }
    }
}

fn sqlite_file_url(path: &std::path::Path) -> String {
    format!("sqlite://{}", path.display())
}

/// Builds a Postgres URL from environment variables
pub fn postgres_url() -> Result<String, AppError> {
    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = must_var("ROTATION_DB")?;
    let username = must_var("APP_DB_USER")?;
    let password = must_var("APP_DB_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| {
        AppError::config_msg(format!("Required environment variable '{name}' is not set"))
    })
}

/// Parse an optional environment variable, falling back to `default` when unset.
pub(crate) fn parse_var<T>(name: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::config(format!("invalid value for {name}"), e)),
        Err(_) => Ok(default),
    }
}
