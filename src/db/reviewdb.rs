use async_trait::async_trait;
use uuid::Uuid;

use super::db::DBClient;
use crate::models::jobmodel::{Report, ReportReason, Review};

const REVIEW_COLUMNS: &str = r#"
    id, job_id, proposal_id, reviewer_id, reviewee_id, rating, text, created_at
"#;

#[derive(Debug, sqlx::FromRow)]
pub struct RatingSummary {
    pub average_rating: Option<f64>,
    pub review_count: i64,
}

#[async_trait]
pub trait ReviewExt {
    async fn create_review(
        &self,
        job_id: Uuid,
        proposal_id: Uuid,
        reviewer_id: Uuid,
        reviewee_id: Uuid,
        rating: i32,
        text: String,
    ) -> Result<Review, sqlx::Error>;

    async fn get_review_by_job_and_reviewer(
        &self,
        job_id: Uuid,
        reviewer_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error>;

    async fn get_reviews_for_user(&self, reviewee_id: Uuid) -> Result<Vec<Review>, sqlx::Error>;

    async fn get_rating_summary(&self, reviewee_id: Uuid) -> Result<RatingSummary, sqlx::Error>;

    async fn create_report(
        &self,
        reporter_id: Uuid,
        reported_user_id: Uuid,
        reason: ReportReason,
        description: Option<String>,
    ) -> Result<Report, sqlx::Error>;
}

#[async_trait]
impl ReviewExt for DBClient {
    async fn create_review(
        &self,
        job_id: Uuid,
        proposal_id: Uuid,
        reviewer_id: Uuid,
        reviewee_id: Uuid,
        rating: i32,
        text: String,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO reviews (job_id, proposal_id, reviewer_id, reviewee_id, rating, text)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {REVIEW_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Review>(&query)
            .bind(job_id)
            .bind(proposal_id)
            .bind(reviewer_id)
            .bind(reviewee_id)
            .bind(rating)
            .bind(text)
            .fetch_one(&self.pool)
            .await
    }

    async fn get_review_by_job_and_reviewer(
        &self,
        job_id: Uuid,
        reviewer_id: Uuid,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE job_id = $1 AND reviewer_id = $2"
        );

        sqlx::query_as::<_, Review>(&query)
            .bind(job_id)
            .bind(reviewer_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn get_reviews_for_user(&self, reviewee_id: Uuid) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE reviewee_id = $1 ORDER BY created_at DESC"
        );

        sqlx::query_as::<_, Review>(&query)
            .bind(reviewee_id)
            .fetch_all(&self.pool)
            .await
    }

    async fn get_rating_summary(&self, reviewee_id: Uuid) -> Result<RatingSummary, sqlx::Error> {
        sqlx::query_as::<_, RatingSummary>(
            r#"
            SELECT AVG(rating)::FLOAT8 as average_rating, COUNT(*) as review_count
            FROM reviews
            WHERE reviewee_id = $1
            "#,
        )
        .bind(reviewee_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn create_report(
        &self,
        reporter_id: Uuid,
        reported_user_id: Uuid,
        reason: ReportReason,
        description: Option<String>,
    ) -> Result<Report, sqlx::Error> {
        sqlx::query_as::<_, Report>(
            r#"
            INSERT INTO reports (reporter_id, reported_user_id, reason, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, reporter_id, reported_user_id, reason, description, created_at
            "#,
        )
        .bind(reporter_id)
        .bind(reported_user_id)
        .bind(reason)
        .bind(description)
        .fetch_one(&self.pool)
        .await
    }
}
