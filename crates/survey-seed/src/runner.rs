//! Orchestration of a full seeding run.
//!
//! Control flow: load the fixture, seed each payload in input order, check
//! that no payload was dropped, then verify the committed surveys. Any
//! failure aborts the run; nothing is retried.

use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::config::SeedConfig;
use crate::db::{SeedError, SeededRecord, Seeder, Verifier, VerifyError};
use crate::loader::{LoadError, SeedFileLoader};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("Seed file contains no payloads")]
    EmptySource,
    #[error(transparent)]
    Seed(#[from] SeedError),
    #[error("Expected {expected} seeded records, got {actual}")]
    Cardinality { expected: usize, actual: usize },
    #[error(transparent)]
    Verify(#[from] VerifyError),
}

/// Result of a completed seeding run: one record per input payload.
#[derive(Debug)]
pub struct RunSummary {
    pub records: Vec<SeededRecord>,
}

/// Runs a full load-seed-verify pass against the given pool.
///
/// Fails before any database write if the fixture is missing, malformed,
/// or empty.
pub async fn run(pool: &PgPool, config: &SeedConfig) -> Result<RunSummary, RunError> {
    let payloads = SeedFileLoader::load_file(&config.seed_path)?;
    if payloads.is_empty() {
        return Err(RunError::EmptySource);
    }
    info!(
        "Loaded {} payloads from {}",
        payloads.len(),
        config.seed_path.display()
    );

    let seeder = Seeder::new(pool.clone())
        .with_allow_duplicate_surveys(config.allow_duplicate_surveys);
    let records = seeder.seed_payloads(&payloads).await?;

    // Every payload must map to exactly one record, even when several share
    // a user.
    if records.len() != payloads.len() {
        return Err(RunError::Cardinality {
            expected: payloads.len(),
            actual: records.len(),
        });
    }

    Verifier::new(pool.clone()).verify(&records).await?;

    Ok(RunSummary { records })
}
