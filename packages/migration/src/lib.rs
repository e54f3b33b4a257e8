pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Statement;
pub use sea_orm::{ConnectionTrait, DatabaseConnection};

mod m20240601_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000001_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

/// Run one migration command against an open connection.
/// Shared by the CLI and by `bootstrap_db`.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let target = describe_target(db).await?;
    let applied_before = count_applied_migrations(db).await?;
    let defined = Migrator::migrations().len();

    tracing::info!(
        cmd = ?command,
        backend = %target.backend,
        database = %target.name,
        defined,
        applied = applied_before,
        "migration=start"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            if command != MigrationCommand::Status {
                let applied_after = count_applied_migrations(db).await?;
                tracing::info!(cmd = ?command, applied = applied_after, "migration=done");
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(cmd = ?command, backend = %target.backend, error = %e, "migration=failed");
            Err(e)
        }
    }
}

struct Target {
    backend: String,
    name: String,
}

async fn describe_target(db: &DatabaseConnection) -> Result<Target, DbErr> {
    let backend = db.get_database_backend();

    let sql = match backend {
        sea_orm::DatabaseBackend::Postgres => "select current_database() as name",
        sea_orm::DatabaseBackend::Sqlite => {
            "SELECT file AS name FROM pragma_database_list WHERE name = 'main'"
        }
        _ => {
            return Ok(Target {
                backend: format!("{backend:?}"),
                name: "<unsupported>".to_string(),
            })
        }
    };

    let row = db
        .query_one(Statement::from_string(backend, sql.to_string()))
        .await?;
    let name = row
        .and_then(|row| row.try_get::<String>("", "name").ok())
        .map(|name| if name.is_empty() { ":memory:".to_string() } else { name })
        .unwrap_or_else(|| "<unknown>".to_string());

    Ok(Target {
        backend: format!("{backend:?}"),
        name,
    })
}

/// Number of applied migrations; 0 when the bookkeeping table does not exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}
