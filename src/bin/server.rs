use anyhow::Context;
use secrecy::ExposeSecret;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::server::app::run_server;
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let settings = Settings::load().context("Failed to load settings")?;
    tracing::info!(
        "Connecting to database at: {}",
        settings.redacted_database_uri()
    );
    let pool = establish_connection(
        settings.database_uri.expose_secret(),
        settings.max_connections,
    )
    .await
    .context("Cannot connect to DB")?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    run_server(pool, &settings.address()).await
}
