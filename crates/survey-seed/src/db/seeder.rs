//! Transactional payload seeding.

use sqlx::{PgPool, Postgres, Transaction};
use thiserror::Error;
use tracing::{debug, info};

use crate::payload::{
    FamilyDetails, GovernmentDetails, IncomeDetails, PersonalDetails, SeedPayload,
};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Failed to seed payload for email={email}: {source}")]
    Payload {
        email: String,
        #[source]
        source: sqlx::Error,
    },
}

/// Generated identifiers for one successfully seeded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRecord {
    pub user_id: i64,
    pub survey_id: i64,
    pub email: String,
}

/// Database seeder for survey submission payloads.
///
/// Each payload is applied inside its own transaction: the user upsert, the
/// survey row, and all four detail rows commit together or not at all. A
/// dropped transaction rolls back, so any insert failure leaves zero net
/// state change for that payload.
pub struct Seeder {
    pool: PgPool,
    allow_duplicate_surveys: bool,
}

impl Seeder {
    /// Creates a new seeder with the given database pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            allow_duplicate_surveys: true,
        }
    }

    /// Sets whether a repeated payload for the same user creates a new
    /// survey (the default) or reuses the existing one.
    pub fn with_allow_duplicate_surveys(mut self, allow: bool) -> Self {
        self.allow_duplicate_surveys = allow;
        self
    }

    /// Seeds a sequence of payloads, strictly in order, stopping at the
    /// first failure.
    pub async fn seed_payloads(
        &self,
        payloads: &[SeedPayload],
    ) -> Result<Vec<SeededRecord>, SeedError> {
        info!("Seeding {} payloads...", payloads.len());

        let mut records = Vec::with_capacity(payloads.len());
        for payload in payloads {
            records.push(self.seed_payload(payload).await?);
        }

        info!("Seeded {} payloads", records.len());
        Ok(records)
    }

    /// Applies one payload as an atomic set of writes.
    ///
    /// On success returns the generated identifiers; on failure the whole
    /// unit is rolled back and the offending email is carried in the error.
    pub async fn seed_payload(&self, payload: &SeedPayload) -> Result<SeededRecord, SeedError> {
        self.seed_in_transaction(payload)
            .await
            .map_err(|source| SeedError::Payload {
                email: payload.user.email.clone(),
                source,
            })
    }

    async fn seed_in_transaction(&self, payload: &SeedPayload) -> Result<SeededRecord, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let user_id = self.upsert_user(&mut tx, payload).await?;

        if !self.allow_duplicate_surveys {
            let existing: Option<(i64,)> = sqlx::query_as(
                r#"
                SELECT survey_id FROM surveys
                WHERE user_id = $1
                ORDER BY survey_id
                LIMIT 1
                "#,
            )
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some((survey_id,)) = existing {
                // Commit anyway: the credential refresh from the upsert
                // still has to land.
                tx.commit().await?;
                debug!("Reused survey {survey_id} for user {user_id}");
                return Ok(SeededRecord {
                    user_id,
                    survey_id,
                    email: payload.user.email.clone(),
                });
            }
        }

        let (survey_id,): (i64,) =
            sqlx::query_as("INSERT INTO surveys (user_id) VALUES ($1) RETURNING survey_id")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;

        // Detail rows reference the survey, so they all come after it and
        // inside the same transaction.
        self.insert_personal_details(&mut tx, survey_id, &payload.personal_details)
            .await?;
        self.insert_family_details(&mut tx, survey_id, &payload.family_details)
            .await?;
        self.insert_income_details(&mut tx, survey_id, &payload.income_details)
            .await?;
        self.insert_government_details(&mut tx, survey_id, &payload.government_details)
            .await?;

        tx.commit().await?;
        debug!("Seeded survey {survey_id} for user {user_id}");

        Ok(SeededRecord {
            user_id,
            survey_id,
            email: payload.user.email.clone(),
        })
    }

    /// Upserts the user by email and returns the resolved id.
    ///
    /// The conflict clause refreshes only the credential; display name and
    /// identity are left untouched for an existing user. Relying on
    /// `ON CONFLICT` rather than select-then-insert keeps the step safe
    /// against concurrent seed runs.
    async fn upsert_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        payload: &SeedPayload,
    ) -> Result<i64, sqlx::Error> {
        let (user_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO users (email, password_hash, display_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO UPDATE
                SET password_hash = EXCLUDED.password_hash
            RETURNING user_id
            "#,
        )
        .bind(&payload.user.email)
        .bind(&payload.user.password_hash)
        .bind(&payload.user.display_name)
        .fetch_one(&mut **tx)
        .await?;

        Ok(user_id)
    }

    async fn insert_personal_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        survey_id: i64,
        pd: &PersonalDetails,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO personal_details (
                survey_id, name, address, phone, gender, state, town,
                constituency_mla, mandal, constituency_mp, religion, age, caste, ward
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(survey_id)
        .bind(&pd.name)
        .bind(&pd.address)
        .bind(&pd.phone)
        .bind(&pd.gender)
        .bind(&pd.state)
        .bind(&pd.town)
        .bind(&pd.constituency_mla)
        .bind(&pd.mandal)
        .bind(&pd.constituency_mp)
        .bind(&pd.religion)
        .bind(pd.age)
        .bind(&pd.caste)
        .bind(&pd.ward)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn insert_family_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        survey_id: i64,
        fd: &FamilyDetails,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO family_details (
                survey_id, total_family_members, total_earning_members, occupation,
                no_of_children, how_many_females, how_many_males
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(survey_id)
        .bind(fd.total_family_members)
        .bind(fd.total_earning_members)
        .bind(&fd.occupation)
        .bind(fd.no_of_children)
        .bind(fd.how_many_females)
        .bind(fd.how_many_males)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn insert_income_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        survey_id: i64,
        id: &IncomeDetails,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO income_details (
                survey_id, how_many_earners, saving_per_month, debt_range,
                interest_rate, source_of_debt
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(survey_id)
        .bind(id.how_many_earners)
        .bind(&id.saving_per_month)
        .bind(&id.debt_range)
        .bind(id.interest_rate)
        .bind(&id.source_of_debt)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    async fn insert_government_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        survey_id: i64,
        gd: &GovernmentDetails,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO government_details (
                survey_id, street_roads, town_village_roads, district_connecting_roads,
                transportation, government_hospitals, government_school_facilities,
                government_facilities_availability, will_you_vote_same_government
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(survey_id)
        .bind(&gd.street_roads)
        .bind(&gd.town_village_roads)
        .bind(&gd.district_connecting_roads)
        .bind(&gd.transportation)
        .bind(&gd.government_hospitals)
        .bind(&gd.government_school_facilities)
        .bind(&gd.government_facilities_availability)
        .bind(gd.will_you_vote_same_government)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Clears all seeded data.
    ///
    /// **WARNING**: This deletes all rows from the survey tables. Use with
    /// caution.
    pub async fn clear_all(&self) -> Result<(), SeedError> {
        info!("Clearing all seeded data...");

        // Order matters due to foreign key constraints
        sqlx::query("DELETE FROM personal_details")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM family_details")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM income_details")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM government_details")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM surveys")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM users").execute(&self.pool).await?;

        info!("All data cleared");
        Ok(())
    }

    /// Returns a reference to the pool for advanced usage.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
