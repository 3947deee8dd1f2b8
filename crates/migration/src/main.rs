use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

#[derive(Parser, Debug)]
#[command(name = "spendwise_migrate")]
#[command(about = "Apply or inspect the spendwise schema migrations")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./spendwise.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Apply every pending migration (default).
    Up,
    /// Roll back the last applied migration.
    Down,
    /// Drop all tables and re-apply every migration.
    Fresh,
    /// Print applied and pending migrations.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => Migrator::up(&db, None).await?,
        Command::Down => Migrator::down(&db, Some(1)).await?,
        Command::Fresh => Migrator::fresh(&db).await?,
        Command::Status => Migrator::status(&db).await?,
    }

    Ok(())
}
