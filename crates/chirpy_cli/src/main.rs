//! Local database bootstrap for Chirpy development.
//!
//! # Responsibility
//! - Create or upgrade a local database by opening it through core.
//! - Report schema state and run the dev-only reset.

use anyhow::{Context, Result};
use chirpy_core::db::migrations::{current_version, latest_version};
use chirpy_core::db::{open_db, open_db_in_memory};
use chirpy_core::{
    init_logging, AdminService, CoreConfig, DatabaseLocation, SqliteUserRepository,
};
use clap::{Parser, Subcommand};
use log::info;
use rusqlite::Connection;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chirpy local database tool", long_about = None)]
struct Args {
    /// Database path, `sqlite://` URL or `:memory:` (overrides DATABASE_PATH)
    #[arg(short, long, value_parser = DatabaseLocation::from_str)]
    database: Option<DatabaseLocation>,

    /// Log level (overrides LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the database and apply pending migrations
    Migrate,
    /// Print the schema version
    Status,
    /// Delete all users and their chirps (dev platform only)
    Reset,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = CoreConfig::from_env().context("failed to load configuration")?;
    if let Some(database) = args.database {
        config.database = database;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    init_logging(&config.log_level, &config.log_dir).context("failed to initialize logging")?;

    let conn = open(&config.database)?;

    match args.command {
        Command::Migrate => {
            println!("chirpy schema version={}", current_version(&conn)?);
        }
        Command::Status => {
            println!("chirpy_core version={}", chirpy_core::core_version());
            println!(
                "chirpy schema version={} latest={}",
                current_version(&conn)?,
                latest_version()
            );
            println!("chirpy platform={}", config.platform.as_str());
        }
        Command::Reset => {
            let repo = SqliteUserRepository::try_new(&conn)?;
            let service = AdminService::new(repo, config.platform);
            let deleted = service.reset()?;
            println!("chirpy reset deleted_users={deleted}");
        }
    }

    Ok(())
}

fn open(location: &DatabaseLocation) -> Result<Connection> {
    let conn = match location {
        DatabaseLocation::File(path) => open_db(path)
            .with_context(|| format!("failed to open database `{}`", path.display()))?,
        DatabaseLocation::InMemory => {
            open_db_in_memory().context("failed to open in-memory database")?
        }
    };
    info!(
        "event=cli_open module=cli status=ok schema_version={}",
        current_version(&conn)?
    );
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::{Args, Command};
    use chirpy_core::DatabaseLocation;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn database_flag_accepts_sqlite_url_and_memory() {
        let args = Args::try_parse_from(["chirpy", "--database", "sqlite://x.db", "status"]).unwrap();
        assert_eq!(
            args.database,
            Some(DatabaseLocation::File(PathBuf::from("x.db")))
        );
        assert!(matches!(args.command, Command::Status));

        let args = Args::try_parse_from(["chirpy", "-d", ":memory:", "migrate"]).unwrap();
        assert_eq!(args.database, Some(DatabaseLocation::InMemory));
    }
}
