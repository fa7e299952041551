//! Job catalog — relational store of job postings.
//!
//! Eligibility (`enable = true`, `end_date` after now) is a read-time
//! invariant enforced in the query, not application code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::job::EligibleJob;

#[async_trait]
pub trait JobCatalog: Send + Sync {
    /// Lists jobs eligible for matching as of `now`, ascending by id.
    async fn list_eligible_jobs(&self, now: DateTime<Utc>) -> Result<Vec<EligibleJob>, AppError>;
}

/// sqlx-backed catalog over the `job` table.
pub struct PgJobCatalog {
    pool: PgPool,
}

impl PgJobCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobCatalog for PgJobCatalog {
    async fn list_eligible_jobs(&self, now: DateTime<Utc>) -> Result<Vec<EligibleJob>, AppError> {
        let jobs = sqlx::query_as::<_, EligibleJob>(
            r#"
            SELECT id, name, detail, experience
            FROM job
            WHERE enable = TRUE AND end_date > $1
            ORDER BY id
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(jobs)
    }
}
