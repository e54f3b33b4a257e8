use clap::{Parser, ValueEnum};
use migration::MigrationCommand;
use rotation_core::telemetry::init_tracing;
use rotation_core::{connect_db, run_migration, DbConfig, DbKind};

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Map rotation database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database type (in-memory SQLite is not offered; it would vanish on exit)
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,

    /// SQLite file path; falls back to ROTATION_SQLITE_PATH
    #[arg(long)]
    sqlite_path: Option<String>,

    /// Emit one JSON object per log event
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.json_logs);

    let config = match (args.db, args.sqlite_path) {
        (Db::SqliteFile, Some(path)) => Ok(DbConfig::sqlite_file(path)),
        (Db::SqliteFile, None) => DbConfig::from_env(DbKind::SqliteFile),
        (Db::Postgres, _) => DbConfig::from_env(DbKind::Postgres),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    let conn = match connect_db(&config).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("Connection failed: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migration(&conn, args.command.into()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
