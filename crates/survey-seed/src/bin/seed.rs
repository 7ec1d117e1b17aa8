//! Seed the survey database from a JSON fixture.
//!
//! Run with:
//! ```
//! cargo run -p survey-seed --bin seed
//! ```

use sqlx::postgres::PgPoolOptions;
use survey_seed::config::{DbConfig, SeedConfig};
use survey_seed::runner;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DbConfig::from_env().url());
    let config = SeedConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    let summary = runner::run(&pool, &config).await?;

    // Summary output
    tracing::info!("Seed completed!");
    for record in &summary.records {
        tracing::info!(
            "  user_id={} survey_id={} email={}",
            record.user_id,
            record.survey_id,
            record.email
        );
    }

    Ok(())
}
