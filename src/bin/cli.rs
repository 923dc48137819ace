use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use trivia_api::db::queries::categories::{get_all_categories, import_categories};
use trivia_api::db::queries::questions::{get_all_questions, import_questions};
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::seed;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database URI, e.g. sqlite://trivia.db
    database_uri: String,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Dump both tables as csv into a directory
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();
    let pool = establish_connection(&cli.database_uri, 1)
        .await
        .context("Cannot connect to DB")?;
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    match cli.command {
        Commands::Export { path } => {
            if !path.exists() {
                std::fs::create_dir_all(&path)?
            }
            let categories = get_all_categories(&pool).await?;
            let questions = get_all_questions(&pool).await?;
            seed::write_to(&path.join(seed::CATEGORIES_FILE), &categories)
                .context("Cannot export categories")?;
            seed::write_to(&path.join(seed::QUESTIONS_FILE), &questions)
                .context("Cannot export questions")?;
            tracing::info!(
                categories = categories.len(),
                questions = questions.len(),
                "Exported to {}",
                path.display()
            );
        }
        Commands::Import { path } => {
            let categories = seed::read_from(&path.join(seed::CATEGORIES_FILE))
                .context("Cannot read categories")?;
            let questions = seed::read_from(&path.join(seed::QUESTIONS_FILE))
                .context("Cannot read questions")?;
            import_categories(&pool, categories).await?;
            import_questions(&pool, questions).await?;
            tracing::info!("Imported from {}", path.display());
        }
    }
    Ok(())
}
