//! Post-commit verification of seeded surveys.

use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use super::SeededRecord;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("personal_details missing for survey {survey_id} (user {email})")]
    MissingDetails { survey_id: i64, email: String },
}

/// Smoke-checks that seeded surveys are observable after commit.
///
/// This proves referential completion (the transaction landed), it does not
/// re-validate every field.
pub struct Verifier {
    pool: PgPool,
}

impl Verifier {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Asserts that every record has at least one `personal_details` row.
    ///
    /// Stops at the first missing record; a miss here means a committed
    /// transaction is not observable, which is a consistency bug, so there
    /// is no repair path.
    pub async fn verify(&self, records: &[SeededRecord]) -> Result<(), VerifyError> {
        for record in records {
            let (count,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM personal_details WHERE survey_id = $1")
                    .bind(record.survey_id)
                    .fetch_one(&self.pool)
                    .await?;

            if count == 0 {
                return Err(VerifyError::MissingDetails {
                    survey_id: record.survey_id,
                    email: record.email.clone(),
                });
            }
        }

        info!("Verified {} seeded surveys", records.len());
        Ok(())
    }
}
