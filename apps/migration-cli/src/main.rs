use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use db_infra::db::{DbKind, RuntimeEnv};
use db_infra::orchestrate_migration;
use migration::MigrationCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Env {
    Prod,
    Test,
}

/// Engines that keep the players table after the process exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Debug, Parser)]
#[command(name = "migration")]
#[command(about = "Creates and migrates the memory-matcher players table")]
struct Args {
    #[arg(value_enum)]
    command: Command,

    /// Runtime profile; `test` insists on a `_test` database
    #[arg(short, long, value_enum, env = "MATCHER_ENV", default_value = "test")]
    env: Env,

    /// Same variable the backend reads to pick its store
    #[arg(short, long, value_enum, env = "MATCHER_DB", default_value = "postgres")]
    db: Db,
}

impl Args {
    fn runtime_env(&self) -> RuntimeEnv {
        match self.env {
            Env::Prod => RuntimeEnv::Prod,
            Env::Test => RuntimeEnv::Test,
        }
    }

    fn db_kind(&self) -> DbKind {
        match self.db {
            Db::Postgres => DbKind::Postgres,
            Db::SqliteFile => DbKind::SqliteFile,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,db_infra=info,sqlx=warn")
        .init();

    let args = Args::parse();

    match orchestrate_migration(args.runtime_env(), args.db_kind(), args.command.into()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, command = ?args.command, "migration failed");
            ExitCode::FAILURE
        }
    }
}
