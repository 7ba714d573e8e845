use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::db::DBClient;
use crate::models::jobmodel::{Job, JobCategory, JobStatus};

const JOB_COLUMNS: &str = r#"
    id, customer_id, title, description, category, budget, location, zip_code,
    status, delivery_notes, delivered_at, created_at, updated_at
"#;

#[async_trait]
pub trait JobExt {
    async fn create_job(
        &self,
        customer_id: Uuid,
        title: String,
        description: String,
        category: JobCategory,
        budget: String,
        location: String,
        zip_code: String,
    ) -> Result<Job, sqlx::Error>;

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, sqlx::Error>;

    async fn search_jobs(
        &self,
        q: Option<&str>,
        category: Option<JobCategory>,
        zip_code: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Job>, sqlx::Error>;

    async fn count_jobs(
        &self,
        q: Option<&str>,
        category: Option<JobCategory>,
        zip_code: Option<&str>,
    ) -> Result<i64, sqlx::Error>;

    async fn get_jobs_by_customer(&self, customer_id: Uuid) -> Result<Vec<Job>, sqlx::Error>;

    /// Move a job from `from` to `to`. The status predicate is part of the
    /// UPDATE itself, so a concurrent transition on the same row makes this
    /// return `None` instead of overwriting it.
    async fn update_job_status(
        &self,
        job_id: Uuid,
        from: JobStatus,
        to: JobStatus,
    ) -> Result<Option<Job>, sqlx::Error>;

    async fn update_job_status_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        from: JobStatus,
        to: JobStatus,
    ) -> Result<Option<Job>, sqlx::Error>;

    async fn record_delivery_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        delivery_notes: &str,
        delivered_at: DateTime<Utc>,
    ) -> Result<Option<Job>, sqlx::Error>;
}

#[async_trait]
impl JobExt for DBClient {
    async fn create_job(
        &self,
        customer_id: Uuid,
        title: String,
        description: String,
        category: JobCategory,
        budget: String,
        location: String,
        zip_code: String,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO jobs (customer_id, title, description, category, budget, location, zip_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {JOB_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(customer_id)
            .bind(title)
            .bind(description)
            .bind(category)
            .bind(budget)
            .bind(location)
            .bind(zip_code)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");

        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn search_jobs(
        &self,
        q: Option<&str>,
        category: Option<JobCategory>,
        zip_code: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Job>, sqlx::Error> {
        let pattern = q.map(|q| format!("%{}%", q));

        let query = format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE status = 'open'
              AND ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1)
              AND ($2::job_category IS NULL OR category = $2)
              AND ($3::text IS NULL OR zip_code = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(pattern)
            .bind(category)
            .bind(zip_code)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    async fn count_jobs(
        &self,
        q: Option<&str>,
        category: Option<JobCategory>,
        zip_code: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let pattern = q.map(|q| format!("%{}%", q));

        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM jobs
            WHERE status = 'open'
              AND ($1::text IS NULL OR title ILIKE $1 OR description ILIKE $1)
              AND ($2::job_category IS NULL OR category = $2)
              AND ($3::text IS NULL OR zip_code = $3)
            "#,
        )
        .bind(pattern)
        .bind(category)
        .bind(zip_code)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_jobs_by_customer(&self, customer_id: Uuid) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE customer_id = $1 ORDER BY created_at DESC"
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn update_job_status(
        &self,
        job_id: Uuid,
        from: JobStatus,
        to: JobStatus,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE jobs
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {JOB_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .bind(from)
            .bind(to)
            .fetch_optional(&self.pool)
            .await
    }

    async fn update_job_status_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        from: JobStatus,
        to: JobStatus,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE jobs
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND status = $2
            RETURNING {JOB_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .bind(from)
            .bind(to)
            .fetch_optional(&mut **tx)
            .await
    }

    async fn record_delivery_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        delivery_notes: &str,
        delivered_at: DateTime<Utc>,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE jobs
            SET status = 'delivered', delivery_notes = $2, delivered_at = $3, updated_at = NOW()
            WHERE id = $1 AND status = 'in_progress'
            RETURNING {JOB_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .bind(delivery_notes)
            .bind(delivered_at)
            .fetch_optional(&mut **tx)
            .await
    }
}
