use migration::{Migrator, MigratorTrait};
use settings::Database;
use tracing_subscriber::EnvFilter;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "spendwise={level},server={level},engine={level}",
            level = settings.app.level
        ))
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let server = settings.server;
    let db = parse_database(&server.database).await.inspect_err(|err| {
        tracing::error!("failed to initialize database: {err}");
    })?;

    let engine = engine::Engine::builder().database(db).build().await?;

    let addr = format!("{}:{}", server.bind, server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.inspect_err(|err| {
        tracing::error!("failed to bind {addr}: {err}");
    })?;

    server::run_with_listener(engine, listener).await?;
    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("database ready, migrations applied");
    Ok(database)
}
