use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{info, trace, warn};

use crate::config::db::{DbConfig, DbKind};
use crate::error::AppError;

/// Get database engine name for logging
fn get_db_engine(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry a connection attempt with fixed interval delays
/// Returns the result of the last attempt after all retries are exhausted
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(
                    "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                    attempt, max_attempts, interval_ms
                );
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

/// Ordered session-level statements applied on every new connection.
/// SQLite journal mode is a connect option and is not included here.
pub fn build_session_statements(config: &DbConfig) -> Vec<String> {
    match config.kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => vec![
            "PRAGMA foreign_keys = ON;".to_string(),
            format!("PRAGMA busy_timeout = {};", config.sqlite_busy_timeout_ms),
        ],
        DbKind::Postgres => vec![
            format!(
                "SET application_name = '{}';",
                config.app_name.replace('\'', "''")
            ),
            "SET timezone = 'UTC';".to_string(),
            format!(
                "SET statement_timeout = '{}';",
                config.pg_statement_timeout.replace('\'', "''")
            ),
        ],
    }
}

/// Open a pool for the configured backend. Does NOT run migrations.
pub async fn connect_db(config: &DbConfig) -> Result<DatabaseConnection, AppError> {
    let statements = build_session_statements(config);

    match config.kind {
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let mut connect_opts = SqliteConnectOptions::from_str(&config.url)
                .map_err(|e| AppError::config("invalid SQLite connection options", e))?
                .create_if_missing(true);
            if config.kind == DbKind::SqliteFile {
                connect_opts = connect_opts.journal_mode(SqliteJournalMode::Wal);
            }

            let mut pool_opts = SqlitePoolOptions::new()
                .max_connections(config.pool_max)
                .acquire_timeout(Duration::from_millis(config.acquire_timeout_ms));
            if config.kind == DbKind::SqliteMemory {
                // the database lives only as long as its single connection
                pool_opts = pool_opts
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
            }

            let pool: SqlitePool = pool_opts
                .after_connect(move |conn, _meta| {
                    let statements = statements.clone();
                    Box::pin(async move {
                        for stmt in &statements {
                            sqlx::query(stmt).execute(&mut *conn).await?;
                        }
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| AppError::config("failed to create SQLite connection pool", e))?;

            info!(
                "pool=create engine=sqlite kind={:?} max={} busy_timeout_ms={}",
                config.kind, config.pool_max, config.sqlite_busy_timeout_ms
            );
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }
        DbKind::Postgres => {
            let url = config.url.clone();
            let pool_max = config.pool_max;
            let acquire_timeout = Duration::from_millis(config.acquire_timeout_ms);

            // Postgres may still be starting alongside us (max 5 tries, 0.5s interval)
            let sqlx_pool = retry_connection(
                || {
                    let url = url.clone();
                    let statements = statements.clone();
                    async move {
                        PgPoolOptions::new()
                            .max_connections(pool_max)
                            .acquire_timeout(acquire_timeout)
                            .after_connect(move |conn, _meta| {
                                let statements = statements.clone();
                                Box::pin(async move {
                                    for stmt in &statements {
                                        sqlx::query(stmt).execute(&mut *conn).await?;
                                    }
                                    Ok::<_, sqlx::Error>(())
                                })
                            })
                            .connect(&url)
                            .await
                            .map_err(|e| AppError::config("failed to connect to Postgres", e))
                    }
                },
                5,
                500,
            )
            .await?;

            info!("pool=create engine=postgres max={}", config.pool_max);
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(sqlx_pool))
        }
    }
}

/// Single entrypoint for callers that need a ready database: connect, then migrate up.
pub async fn bootstrap_db(config: &DbConfig) -> Result<DatabaseConnection, AppError> {
    info!(
        "bootstrap=start db_kind={:?} engine={} pid={}",
        config.kind,
        get_db_engine(config.kind),
        std::process::id()
    );

    let conn = connect_db(config).await?;
    run_migration(&conn, MigrationCommand::Up).await?;

    info!("bootstrap=ready");
    Ok(conn)
}

/// Run one migration command against an open connection.
pub async fn run_migration(
    conn: &DatabaseConnection,
    command: MigrationCommand,
) -> Result<(), AppError> {
    migration::migrate(conn, command)
        .await
        .map_err(|e| AppError::config("migration failed", e))
}
